//! # fp-viz-render
//!
//! Draws fast-plotter histogram artifacts as SVG, with optional PNG (default
//! feature `png`) and PDF (feature `pdf`) output.

pub mod canvas;
pub mod color;
pub mod config;
pub mod font;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use std::path::Path;

use config::VizConfig;
use fp_core::BinnedTable;
use fp_viz::{Hist1dArtifact, PlotCollection, PlotOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] fp_core::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// A rendered plot: the SVG plus the artifact it was drawn from.
#[derive(Debug, Clone)]
pub struct Figure {
    pub svg: String,
    pub artifact: Hist1dArtifact,
    pub dpi: u32,
}

impl Figure {
    pub fn render(artifact: Hist1dArtifact, config: &VizConfig) -> Result<Self> {
        let svg = plots::hist1d::render(&artifact, config)?;
        Ok(Self { svg, artifact, dpi: config.output.dpi })
    }

    /// Encode as `svg`, `png` or `pdf` (case-insensitive).
    pub fn to_bytes(&self, format: &str) -> Result<Vec<u8>> {
        svg_to_bytes(&self.svg, format, self.dpi)
    }

    /// Write to `path`, choosing the format from its extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if ext.eq_ignore_ascii_case("svg") {
            return output::svg::save_svg(&self.svg, path);
        }
        let bytes = self.to_bytes(ext)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// The artifact as pretty-printed JSON.
    pub fn artifact_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.artifact)?)
    }
}

/// Encode an SVG string in the requested format.
#[cfg_attr(not(feature = "png"), allow(unused_variables))]
pub fn svg_to_bytes(svg: &str, format: &str, dpi: u32) -> Result<Vec<u8>> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(svg.as_bytes().to_vec()),
        #[cfg(feature = "png")]
        "png" => output::png::svg_to_png(svg, dpi),
        #[cfg(feature = "pdf")]
        "pdf" => output::pdf::svg_to_pdf(svg),
        _ => Err(RenderError::UnsupportedFormat(format.to_string())),
    }
}

/// Build and render one figure per binning dimension of a reduced table.
pub fn plot_all(
    table: &BinnedTable,
    title: &str,
    options: &PlotOptions,
    config: &VizConfig,
) -> Result<PlotCollection<Figure>> {
    let artifacts = fp_viz::hist1d_artifacts(table, title, options)?;
    if artifacts.is_empty() {
        tracing::warn!("{title}: no binning dimensions to plot");
    }
    artifacts
        .into_iter()
        .map(|(properties, artifact)| Ok((properties, Figure::render(artifact, config)?)))
        .collect()
}
