/// Upper bound on major ticks along one linear axis.
const MAX_TICKS: usize = 200;

/// Axis configuration with tick generation and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    /// Linear axis padded out to "nice number" limits.
    ///
    /// Non-finite limits give a unit axis.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        if !(data_min.is_finite() && data_max.is_finite()) {
            return Self::linear_ticks(0.0, 1.0, 0.2);
        }
        let (nice_min, nice_max, step) = nice_range(data_min, data_max, target_ticks);
        Self::linear_ticks(nice_min, nice_max, step)
    }

    /// Linear axis with exactly the given limits and nice ticks inside them.
    pub fn exact_linear(min: f64, max: f64, target_ticks: usize) -> Self {
        if !(min.is_finite() && max.is_finite()) {
            return Self::linear_ticks(0.0, 1.0, 0.2);
        }
        let (_, _, step) = nice_range(min, max, target_ticks);
        let mut axis = Self::linear_ticks((min / step).ceil() * step, max, step);
        axis.min = min;
        axis.max = max;
        axis
    }

    fn linear_ticks(first: f64, last: f64, step: f64) -> Self {
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut i = 0;
        loop {
            let v = first + i as f64 * step;
            if v > last + step * 0.01 || ticks.len() >= MAX_TICKS {
                break;
            }
            ticks.push(v);
            labels.push(format_tick(v, step));
            i += 1;
        }

        // 5 minor subdivisions per major, including the partial interval before the first.
        let minor_step = step / 5.0;
        let minor = (-4..(ticks.len() as i64 * 5))
            .filter(|k| k % 5 != 0)
            .map(|k| first + k as f64 * minor_step)
            .filter(|v| *v <= last + minor_step * 0.01)
            .collect();

        Self {
            min: first,
            max: last,
            log: false,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
            minor_ticks: minor,
        }
    }

    /// Logarithmic axis spanning whole decades around the data.
    ///
    /// Limits are held to `1e-20..=1e300`; non-finite ones give `1..10`.
    pub fn auto_log(data_min: f64, data_max: f64) -> Self {
        let (data_min, data_max) = if data_min.is_finite() && data_max.is_finite() {
            (data_min.clamp(1e-20, 1e300), data_max.clamp(1e-20, 1e300))
        } else {
            (1.0, 10.0)
        };
        let data_max = data_max.max(data_min);
        let log_min = data_min.log10().floor() as i32;
        let mut log_max = data_max.log10().ceil() as i32;
        if log_max <= log_min {
            log_max = log_min + 1;
        }

        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut minor = Vec::new();
        for exp in log_min..=log_max {
            ticks.push(10.0_f64.powi(exp));
            labels.push(format!("10{}", superscript(exp)));
            if exp < log_max {
                minor.extend((2..=9).map(|m| m as f64 * 10.0_f64.powi(exp)));
            }
        }

        Self {
            min: 10.0_f64.powi(log_min),
            max: 10.0_f64.powi(log_max),
            log: true,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
            minor_ticks: minor,
        }
    }

    /// Unit slots `0..n` with a labelled tick at each slot centre.
    pub fn categorical(labels: &[String]) -> Self {
        Self {
            min: 0.0,
            max: labels.len().max(1) as f64,
            log: false,
            label: String::new(),
            tick_positions: (0..labels.len()).map(|i| i as f64 + 0.5).collect(),
            tick_labels: labels.to_vec(),
            minor_ticks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let log_val = value.max(1e-20).ln();
            let log_min = self.min.max(1e-20).ln();
            let log_max = self.max.max(1e-20).ln();
            (log_val - log_min) / (log_max - log_min)
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }

    /// Pull a value into the axis range (non-positive values go to `min` on log axes).
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() || (self.log && value <= 0.0) {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// "Nice numbers" algorithm for pleasant tick spacing.
fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    if (data_max - data_min).abs() < 1e-15 {
        return (data_min - 1.0, data_max + 1.0, 1.0);
    }
    let range = data_max - data_min;
    let rough_step = range / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough_step);
    let nice_min = (data_min / step).floor() * step;
    let nice_max = (data_max / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    format!("{v:.decimals$}")
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}
