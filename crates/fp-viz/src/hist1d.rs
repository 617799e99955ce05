//! Stacked 1D histogram artifacts (numbers-first).

use fp_core::{BinLabel, BinnedTable, Error, Result, SUMW};
use serde::Serialize;

use crate::options::{PlotOptions, YScale};
use crate::projection::{ProjectedSeries, Projection, project_1d};
use crate::properties::{PlotCollection, PlotProperties};
use crate::roles::DatasetRole;

/// Schema tag written into every artifact.
pub const HIST1D_SCHEMA_VERSION: &str = "fast_plotter_hist1d_v0";

/// Name of the combined data series when several datasets are data.
pub const COMBINED_DATA: &str = "data";

#[derive(Debug, Clone, Serialize)]
pub struct Hist1dArtifact {
    pub schema_version: String,
    pub title: String,
    pub dimension: String,
    /// `n_bins + 1` edges. Categorical axes use unit slots `0..=n_bins`.
    pub bin_edges: Vec<f64>,
    /// Tick text for categorical axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_labels: Option<Vec<String>>,
    pub yscale: YScale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lumi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Hist1dSeries>,
    /// Stack order, bottom first.
    pub backgrounds: Vec<Hist1dSeries>,
    pub signals: Vec<Hist1dSeries>,
    pub total_background: Vec<f64>,
    pub total_background_err: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<RatioSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hist1dSeries {
    pub name: String,
    pub y: Vec<f64>,
    /// `sqrt(sumw2)`, zero when the table has no `sumw2`.
    pub yerr: Vec<f64>,
}

/// Data over total background. Bins with no background are NaN.
#[derive(Debug, Clone, Serialize)]
pub struct RatioSeries {
    pub y: Vec<f64>,
    pub yerr: Vec<f64>,
    /// Relative background uncertainty around 1.
    pub band: Vec<f64>,
}

impl Hist1dArtifact {
    /// Classify, scale and combine the series of one projection.
    pub fn from_projection(projection: &Projection, title: &str, options: &PlotOptions) -> Self {
        let n_bins = projection.bins.len();
        let (bin_edges, bin_labels) = bin_geometry(&projection.bins);

        let mut data: Vec<&ProjectedSeries> = Vec::new();
        let mut backgrounds = Vec::new();
        let mut signals = Vec::new();
        for s in &projection.series {
            let role = DatasetRole::classify(&s.dataset, &options.data, &options.signal);
            let scale = if role.is_simulated() { options.lumi.unwrap_or(1.0) } else { 1.0 };
            match role {
                DatasetRole::Data => data.push(s),
                DatasetRole::Signal => signals.push(to_series(s, scale)),
                DatasetRole::Background => backgrounds.push(to_series(s, scale)),
            }
        }
        backgrounds.sort_by(|a, b| integral(a).total_cmp(&integral(b)));

        let data = combine_data(&data, n_bins);

        let mut total_background = vec![0.0; n_bins];
        let mut total_var = vec![0.0; n_bins];
        for s in &backgrounds {
            for i in 0..n_bins {
                total_background[i] += s.y[i];
                total_var[i] += s.yerr[i] * s.yerr[i];
            }
        }
        let total_background_err: Vec<f64> = total_var.iter().map(|v| v.sqrt()).collect();

        let ratio = data.as_ref().filter(|_| !backgrounds.is_empty()).map(|d| {
            let mut ratio = RatioSeries {
                y: vec![f64::NAN; n_bins],
                yerr: vec![f64::NAN; n_bins],
                band: vec![0.0; n_bins],
            };
            for i in 0..n_bins {
                let t = total_background[i];
                if t > 0.0 {
                    ratio.y[i] = d.y[i] / t;
                    ratio.yerr[i] = d.yerr[i] / t;
                    ratio.band[i] = total_background_err[i] / t;
                }
            }
            ratio
        });

        Self {
            schema_version: HIST1D_SCHEMA_VERSION.to_string(),
            title: title.to_string(),
            dimension: projection.dimension.clone(),
            bin_edges,
            bin_labels,
            yscale: options.yscale,
            lumi: options.lumi,
            data,
            backgrounds,
            signals,
            total_background,
            total_background_err,
            ratio,
        }
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.bin_edges.len().saturating_sub(1)
    }
}

/// One artifact per binning dimension (the dataset column excluded), keyed by
/// `[("project", <dim>), ("yscale", <scale>)]`.
///
/// A reduced table without a `sumw` column (an unknown scheme) is an error.
pub fn hist1d_artifacts(
    table: &BinnedTable,
    title: &str,
    options: &PlotOptions,
) -> Result<PlotCollection<Hist1dArtifact>> {
    if table.value_column(SUMW).is_none() {
        return Err(Error::Table(format!("reduced table has no '{SUMW}' column")));
    }

    let mut plots = PlotCollection::new();
    for dim in table.index_columns().iter().filter(|c| c.name != options.dataset_col) {
        tracing::debug!("making 1D projection: {}", dim.name);
        let projection = project_1d(table, &dim.name, &options.dataset_col)?;
        let key = PlotProperties::new()
            .with("project", dim.name.as_str())
            .with("yscale", options.yscale.as_str());
        plots.insert(key, Hist1dArtifact::from_projection(&projection, title, options));
    }
    Ok(plots)
}

fn to_series(s: &ProjectedSeries, scale: f64) -> Hist1dSeries {
    let y = s.sumw.iter().map(|v| v * scale).collect();
    let yerr = match &s.sumw2 {
        // sumw2 scales with scale², so its root scales linearly.
        Some(w2) => w2.iter().map(|v| v.max(0.0).sqrt() * scale).collect(),
        None => vec![0.0; s.sumw.len()],
    };
    Hist1dSeries { name: s.dataset.clone(), y, yerr }
}

fn combine_data(series: &[&ProjectedSeries], n_bins: usize) -> Option<Hist1dSeries> {
    match series {
        [] => None,
        [single] => Some(to_series(single, 1.0)),
        many => {
            let mut y = vec![0.0; n_bins];
            let mut var = vec![0.0; n_bins];
            for s in many {
                for i in 0..n_bins {
                    y[i] += s.sumw[i];
                    var[i] += s.sumw2.as_ref().map_or(0.0, |w2| w2[i]);
                }
            }
            let yerr = var.iter().map(|v: &f64| v.max(0.0).sqrt()).collect();
            Some(Hist1dSeries { name: COMBINED_DATA.to_string(), y, yerr })
        }
    }
}

fn integral(s: &Hist1dSeries) -> f64 {
    s.y.iter().sum()
}

/// Real edges when every bin is an interval, unit slots with labels otherwise.
fn bin_geometry(bins: &[BinLabel]) -> (Vec<f64>, Option<Vec<String>>) {
    if let Some(edges) = interval_edges(bins) {
        return (edges, None);
    }
    let edges = (0..=bins.len()).map(|i| i as f64).collect();
    (edges, Some(bins.iter().map(ToString::to_string).collect()))
}

fn interval_edges(bins: &[BinLabel]) -> Option<Vec<f64>> {
    let mut edges = Vec::with_capacity(bins.len() + 1);
    let mut upper = None;
    for bin in bins {
        let BinLabel::Interval { lo, hi, .. } = bin else {
            return None;
        };
        // Gaps or overlaps between neighbours cannot be drawn on a shared axis.
        if upper.is_some_and(|prev: f64| prev != *lo) {
            return None;
        }
        edges.push(*lo);
        upper = Some(*hi);
    }
    edges.push(upper?);

    // Underflow/overflow bins borrow the width of their neighbour.
    let n = edges.len();
    if n >= 3 && !edges[0].is_finite() && edges[1].is_finite() && edges[2].is_finite() {
        edges[0] = edges[1] - (edges[2] - edges[1]);
    }
    if n >= 3 && !edges[n - 1].is_finite() && edges[n - 2].is_finite() && edges[n - 3].is_finite()
    {
        edges[n - 1] = edges[n - 2] + (edges[n - 2] - edges[n - 3]);
    }

    let usable = edges.iter().all(|e| e.is_finite()) && edges.windows(2).all(|w| w[1] > w[0]);
    usable.then_some(edges)
}
