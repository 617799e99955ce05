use regex::Regex;
use serde::Serialize;

/// What a dataset represents on a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetRole {
    /// Recorded data: drawn as markers, never scaled.
    Data,
    /// Signal simulation: drawn as an unstacked line.
    Signal,
    /// Background simulation: stacked.
    Background,
}

impl DatasetRole {
    /// Data wins over signal; anything unmatched is background.
    ///
    /// Patterns must match at the start of the name.
    pub fn classify(name: &str, data: &Regex, signal: &Regex) -> Self {
        if matches_at_start(data, name) {
            DatasetRole::Data
        } else if matches_at_start(signal, name) {
            DatasetRole::Signal
        } else {
            DatasetRole::Background
        }
    }

    /// Whether the series comes from simulation (and so follows lumi scaling).
    pub fn is_simulated(self) -> bool {
        self != DatasetRole::Data
    }
}

// Leftmost-first search returns a start-anchored match whenever one exists.
fn matches_at_start(re: &Regex, name: &str) -> bool {
    re.find(name).is_some_and(|m| m.start() == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str) -> DatasetRole {
        let data = Regex::new("data").unwrap();
        let signal = Regex::new("signal|hh_").unwrap();
        DatasetRole::classify(name, &data, &signal)
    }

    #[test]
    fn roles_from_name_prefix() {
        assert_eq!(classify("data_2018"), DatasetRole::Data);
        assert_eq!(classify("signal_m500"), DatasetRole::Signal);
        assert_eq!(classify("hh_bbbb"), DatasetRole::Signal);
        assert_eq!(classify("ttbar"), DatasetRole::Background);
    }

    #[test]
    fn match_must_start_at_beginning() {
        assert_eq!(classify("mc_like_data"), DatasetRole::Background);
        assert_eq!(classify("bkg_signal"), DatasetRole::Background);
    }

    #[test]
    fn data_takes_precedence() {
        let both = Regex::new("d").unwrap();
        assert_eq!(DatasetRole::classify("dy", &both, &both), DatasetRole::Data);
    }
}
