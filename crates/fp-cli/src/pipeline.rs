//! Per-file processing: read → split by weighting scheme → plot → write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fp_core::{BinnedTable, decipher_filename, read_binned_table, reduce_for_scheme, weighting_schemes};
use fp_viz::{PlotCollection, PlotOptions, PlotProperties};
use fp_viz_render::Figure;
use fp_viz_render::config::VizConfig;

/// Something that can be written to disk as an image.
pub trait PlotFigure {
    fn save(&self, path: &Path) -> Result<()>;
    fn artifact_json(&self) -> Result<String>;
}

/// Turns one reduced table into a collection of figures.
pub trait PlotGenerator {
    type Figure: PlotFigure;

    fn generate(&self, table: &BinnedTable, title: &str) -> Result<PlotCollection<Self::Figure>>;
}

impl PlotFigure for Figure {
    fn save(&self, path: &Path) -> Result<()> {
        Ok(Figure::save(self, path)?)
    }

    fn artifact_json(&self) -> Result<String> {
        Ok(Figure::artifact_json(self)?)
    }
}

/// Stacked 1D histograms drawn with `fp-viz-render`.
pub struct RenderGenerator {
    pub options: PlotOptions,
    pub config: VizConfig,
}

impl PlotGenerator for RenderGenerator {
    type Figure = Figure;

    fn generate(&self, table: &BinnedTable, title: &str) -> Result<PlotCollection<Figure>> {
        Ok(fp_viz_render::plot_all(table, title, &self.options, &self.config)?)
    }
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Must already exist.
    pub outdir: PathBuf,
    pub extension: String,
    /// Schemes to process; empty means all.
    pub weights: Vec<String>,
    /// Also write each figure's JSON artifact.
    pub save_artifacts: bool,
}

/// Process one table file. Returns the number of plots written.
pub fn process_one_file<G: PlotGenerator>(
    path: &Path,
    generator: &G,
    settings: &OutputSettings,
) -> Result<usize> {
    tracing::info!("Processing: {}", path.display());
    let table = read_binned_table(path)
        .with_context(|| format!("failed to read table {}", path.display()))?;

    let schemes = weighting_schemes(&table);
    for requested in &settings.weights {
        if !schemes.contains(requested) {
            tracing::warn!(
                "{}: weighting scheme '{requested}' not found (have: {})",
                path.display(),
                schemes.join(", ")
            );
        }
    }

    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut written = 0;
    for scheme in &schemes {
        if !settings.weights.is_empty() && !settings.weights.contains(scheme) {
            tracing::debug!("{}: skipping weighting scheme '{scheme}'", path.display());
            continue;
        }
        let reduced = reduce_for_scheme(&table, scheme);
        let plots = generator
            .generate(&reduced, &format!("{stem}__{scheme}"))
            .with_context(|| format!("{}: plotting weighting scheme '{scheme}'", path.display()))?;
        written += save_plots(path, scheme, &plots, settings)
            .with_context(|| format!("{}: saving plots for '{scheme}'", path.display()))?;
    }
    Ok(written)
}

/// `<outdir>/plot_<dims>--<scheme>--<k1>_<v1>-<k2>_<v2>.<ext>`
pub fn plot_path(
    infile: &Path,
    scheme: &str,
    properties: &PlotProperties,
    outdir: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let dims = decipher_filename(infile)?.binning.join(".");
    let props: Vec<String> = properties.iter().map(|(k, v)| format!("{k}_{v}")).collect();
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    Ok(outdir.join(format!("plot_{dims}--{scheme}--{}.{ext}", props.join("-"))))
}

/// Write every figure of a collection. Existing files are overwritten.
pub fn save_plots<F: PlotFigure>(
    infile: &Path,
    scheme: &str,
    plots: &PlotCollection<F>,
    settings: &OutputSettings,
) -> Result<usize> {
    for (properties, figure) in plots {
        let path = plot_path(infile, scheme, properties, &settings.outdir, &settings.extension)?;
        tracing::info!("Saving plot: {}", path.display());
        figure.save(&path).with_context(|| format!("failed to write {}", path.display()))?;

        if settings.save_artifacts {
            let json_path = path.with_extension("json");
            std::fs::write(&json_path, figure.artifact_json()?)
                .with_context(|| format!("failed to write {}", json_path.display()))?;
        }
    }
    Ok(plots.len())
}
