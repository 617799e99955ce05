use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;

use crate::RenderError;
use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub experiment: ExperimentConfig,
    pub colors: ColorsConfig,
    pub palette: String,
    /// Fixed colours for named datasets, overriding the palette.
    pub sample_colors: BTreeMap<String, Color>,
    pub output: OutputConfig,
    pub hist1d: Hist1dConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::FastPlot.base_config()
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }

    /// Colour for the `index`-th series, honouring `sample_colors`.
    pub fn series_color(&self, name: &str, index: usize, palette: &[Color]) -> Color {
        if let Some(c) = self.sample_colors.get(name) {
            return *c;
        }
        if palette.is_empty() { Color::hex("#888888") } else { palette[index % palette.len()] }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        // 6.4" x 4.8"
        Self { width: 460.8, height: 345.6 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 9.0 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AxesConfig {
    /// `in` or `out`.
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#b0b0b0"), alpha: 0.5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub name: String,
    pub status: String,
    /// Centre-of-mass energy; `0` hides it.
    pub sqrt_s_tev: f64,
    /// Integrated luminosity shown in the header; `0` hides it.
    pub lumi: f64,
    pub lumi_unit: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: String::new(),
            sqrt_s_tev: 0.0,
            lumi: 0.0,
            lumi_unit: "fb\u{207B}\u{00B9}".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub data: Color,
    /// Fill of the background uncertainty band.
    pub band: Color,
    /// Ratio-panel reference line at 1.
    pub reference: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            data: Color::BLACK,
            band: Color::hex("#555555"),
            reference: Color::hex("#969696"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dpi: 150 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Hist1dConfig {
    /// Draw the data / background panel when both exist.
    pub show_ratio: bool,
    pub ratio_y_range: [f64; 2],
    /// Draw the total background uncertainty band.
    pub show_band: bool,
    pub y_label: String,
    pub ratio_label: String,
}

impl Default for Hist1dConfig {
    fn default() -> Self {
        Self {
            show_ratio: true,
            ratio_y_range: [0.5, 1.5],
            show_band: true,
            y_label: "Events".into(),
            ratio_label: "Data / MC".into(),
        }
    }
}

/// Resolve a [`VizConfig`].
///
/// Priority: user YAML overrides → built-in theme (`theme` argument, else
/// the YAML's own `theme` key, else the default theme).
pub fn resolve_config(theme: Option<&str>, user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let overlay: Option<Value> = user_yaml
        .map(serde_yaml_ng::from_str)
        .transpose()
        .map_err(|e| RenderError::Config(e.to_string()))?;

    let theme_name = theme.map(str::to_string).or_else(|| {
        overlay.as_ref().and_then(|v| v.get("theme")).and_then(Value::as_str).map(str::to_string)
    });
    let base = match theme_name.as_deref() {
        Some(name) => BuiltinTheme::parse(name)
            .ok_or_else(|| RenderError::Config(format!("unknown theme '{name}'")))?
            .base_config(),
        None => VizConfig::default(),
    };

    let Some(overlay) = overlay.filter(|v| !v.is_null()) else {
        return Ok(base);
    };
    let mut merged = serde_yaml_ng::to_value(&base).map_err(|e| RenderError::Config(e.to_string()))?;
    merge(&mut merged, overlay);
    let mut config: VizConfig =
        serde_yaml_ng::from_value(merged).map_err(|e| RenderError::Config(e.to_string()))?;
    // An explicit theme argument wins over the file's `theme` key.
    if let Some(name) = theme {
        config.theme = name.to_ascii_lowercase();
    }
    Ok(config)
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
