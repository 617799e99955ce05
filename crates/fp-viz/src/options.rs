use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;

/// Y-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YScale {
    /// Logarithmic
    #[default]
    Log,
    /// Linear
    Linear,
}

impl YScale {
    /// Lowercase name, as used in plot properties and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            YScale::Log => "log",
            YScale::Linear => "linear",
        }
    }
}

impl fmt::Display for YScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(YScale::Log),
            "linear" => Ok(YScale::Linear),
            other => Err(format!("unknown y scale '{other}': expected 'log' or 'linear'")),
        }
    }
}

/// Display options handed to the plot generator.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Index column that distinguishes datasets (one series each).
    pub dataset_col: String,
    /// Datasets whose name matches this at its start are real data.
    pub data: Regex,
    /// Datasets whose name matches this at its start are signal simulation.
    pub signal: Regex,
    /// Scale every simulated series by this luminosity.
    pub lumi: Option<f64>,
    /// Y-axis scale.
    pub yscale: YScale,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            dataset_col: "dataset".into(),
            data: Regex::new("data").expect("static data regex"),
            signal: Regex::new("signal").expect("static signal regex"),
            lumi: None,
            yscale: YScale::Log,
        }
    }
}
