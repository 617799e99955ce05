//! fast-plotter CLI

mod pipeline;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fp_viz::{PlotOptions, YScale};
use fp_viz_render::config::resolve_config;
use regex::Regex;

use crate::pipeline::{OutputSettings, RenderGenerator, process_one_file};

#[derive(Parser)]
#[command(name = "fast-plotter")]
#[command(about = "Turn binned tables into plots, one set per weighting scheme")]
#[command(version)]
struct Cli {
    /// Binned tables to plot (`.csv`, `.tsv`, `.txt` or `.dat`)
    #[arg(required = true)]
    tables: Vec<PathBuf>,

    /// Directory to write plots into (must exist)
    #[arg(short, long, default_value = "plots")]
    outdir: PathBuf,

    /// Image format / file extension (svg, png, pdf)
    #[arg(short, long, default_value = "png", value_parser = parse_extension)]
    extension: String,

    /// Comma-separated weighting schemes to plot (default: all)
    #[arg(short, long, value_delimiter = ',')]
    weights: Vec<String>,

    /// Regex matched against the start of dataset names to find real data
    #[arg(short, long, default_value = "data")]
    data: String,

    /// Regex matched against the start of dataset names to find signal
    #[arg(short, long, default_value = "signal")]
    signal: String,

    /// Column that names the dataset of each row
    #[arg(long, default_value = "dataset")]
    dataset_col: String,

    /// Scale simulated datasets by this luminosity
    #[arg(short, long)]
    lumi: Option<f64>,

    /// Y-axis scale
    #[arg(short, long, value_enum, default_value_t = YScaleArg::Log)]
    yscale: YScaleArg,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Visualization config (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in theme: fastplot, atlas, cms or minimal
    #[arg(long)]
    theme: Option<String>,

    /// Also write each plot's JSON artifact next to the image
    #[arg(long)]
    save_artifacts: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum YScaleArg {
    Log,
    Linear,
}

impl From<YScaleArg> for YScale {
    fn from(arg: YScaleArg) -> Self {
        match arg {
            YScaleArg::Log => YScale::Log,
            YScaleArg::Linear => YScale::Linear,
        }
    }
}

fn parse_extension(raw: &str) -> std::result::Result<String, String> {
    let ext = raw.strip_prefix('.').unwrap_or(raw);
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
        return Err(format!("'{raw}' is not a file extension (expected e.g. png, svg, pdf)"));
    }
    Ok(ext.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(subscriber, || run(cli))
}

fn run(cli: Cli) -> Result<()> {
    let options = PlotOptions {
        dataset_col: cli.dataset_col,
        data: Regex::new(&cli.data).with_context(|| format!("invalid --data regex '{}'", cli.data))?,
        signal: Regex::new(&cli.signal)
            .with_context(|| format!("invalid --signal regex '{}'", cli.signal))?,
        lumi: cli.lumi,
        yscale: cli.yscale.into(),
    };

    let yaml = cli
        .config
        .as_ref()
        .map(|p| {
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read config {}", p.display()))
        })
        .transpose()?;
    let mut config = resolve_config(cli.theme.as_deref(), yaml.as_deref())?;
    if let Some(lumi) = cli.lumi {
        config.experiment.lumi = lumi;
    }
    tracing::debug!("theme: {}", config.theme);

    let generator = RenderGenerator { options, config };
    let settings = OutputSettings {
        outdir: cli.outdir,
        extension: cli.extension,
        weights: cli.weights,
        save_artifacts: cli.save_artifacts,
    };

    let mut written = 0;
    for table in &cli.tables {
        written += process_one_file(table, &generator, &settings)?;
    }
    tracing::info!("wrote {written} plot(s) from {} table(s)", cli.tables.len());
    Ok(())
}
