use crate::color::Color;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    FastPlot,
    Atlas,
    Cms,
    Minimal,
}

impl BuiltinTheme {
    pub const NAMES: &'static [&'static str] = &["fastplot", "atlas", "cms", "minimal"];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fastplot" | "default" => Some(Self::FastPlot),
            "atlas" => Some(Self::Atlas),
            "cms" => Some(Self::Cms),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::FastPlot => fastplot(),
            Self::Atlas => atlas(),
            Self::Cms => cms(),
            Self::Minimal => minimal(),
        }
    }
}

fn fastplot() -> VizConfig {
    VizConfig {
        theme: "fastplot".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        experiment: ExperimentConfig::default(),
        colors: ColorsConfig::default(),
        palette: "fastplot".into(),
        sample_colors: Default::default(),
        output: OutputConfig::default(),
        hist1d: Hist1dConfig::default(),
    }
}

fn atlas() -> VizConfig {
    VizConfig {
        theme: "atlas".into(),
        figure: FigureConfig { width: 432.0, height: 432.0 },
        font: FontConfig { size: 11.0, label_size: 12.0, tick_size: 10.0 },
        axes: AxesConfig { tick_length: 6.0, ..AxesConfig::default() },
        experiment: ExperimentConfig {
            name: "ATLAS".into(),
            status: "Internal".into(),
            sqrt_s_tev: 13.0,
            ..ExperimentConfig::default()
        },
        palette: "atlas_wong".into(),
        ..fastplot()
    }
}

fn cms() -> VizConfig {
    VizConfig {
        theme: "cms".into(),
        figure: FigureConfig { width: 720.0, height: 720.0 },
        font: FontConfig { size: 12.0, label_size: 14.0, tick_size: 11.0 },
        experiment: ExperimentConfig {
            name: "CMS".into(),
            status: "Preliminary".into(),
            sqrt_s_tev: 13.0,
            ..ExperimentConfig::default()
        },
        palette: "cms_petroff6".into(),
        ..fastplot()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0 },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        grid: GridConfig { show: true, color: Color::hex("#dddddd"), alpha: 0.8 },
        palette: "greys".into(),
        ..fastplot()
    }
}
