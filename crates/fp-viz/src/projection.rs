use std::collections::HashMap;

use fp_core::{BinLabel, BinnedTable, Error, Result, SUMW, SUMW2};

/// Name of the single series used when the table has no dataset column.
pub const TOTAL_SERIES: &str = "total";

/// One dataset's contents along the projected dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedSeries {
    /// Dataset name
    pub dataset: String,
    /// Sum of weights per bin
    pub sumw: Vec<f64>,
    /// Sum of squared weights per bin, when the table provides it
    pub sumw2: Option<Vec<f64>>,
}

/// A reduced table summed over every dimension except one.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The dimension kept
    pub dimension: String,
    /// Distinct bins in layout order
    pub bins: Vec<BinLabel>,
    /// Series in order of first appearance
    pub series: Vec<ProjectedSeries>,
}

/// Sum `sumw`/`sumw2` per (bin of `dim`, dataset) over all other dimensions.
///
/// Missing cells count as zero. Bins are laid out by interval lower edge or
/// numeric value, categories after them in order of first appearance.
pub fn project_1d(table: &BinnedTable, dim: &str, dataset_col: &str) -> Result<Projection> {
    let axis = table
        .index_column(dim)
        .ok_or_else(|| Error::Table(format!("no binning column '{dim}'")))?;
    let sumw = table
        .value_column(SUMW)
        .ok_or_else(|| Error::Table(format!("reduced table has no '{SUMW}' column")))?;
    let sumw2 = table.value_column(SUMW2);

    let (bins, row_bin) = distinct(&axis.labels);
    let mut order: Vec<usize> = (0..bins.len()).collect();
    order.sort_by(|&a, &b| bins[a].layout_cmp(&bins[b]));
    let mut slot = vec![0; bins.len()];
    for (new, &old) in order.iter().enumerate() {
        slot[old] = new;
    }
    let bins: Vec<BinLabel> = order.iter().map(|&i| bins[i].clone()).collect();

    let (names, row_series) = match table.index_column(dataset_col) {
        Some(col) => {
            let (labels, rows) = distinct(&col.labels);
            (labels.iter().map(|l| l.to_string()).collect(), rows)
        }
        None => (vec![TOTAL_SERIES.to_string()], vec![0; table.n_rows()]),
    };

    let n_bins = bins.len();
    let mut series: Vec<ProjectedSeries> = names
        .into_iter()
        .map(|dataset| ProjectedSeries {
            dataset,
            sumw: vec![0.0; n_bins],
            sumw2: sumw2.map(|_| vec![0.0; n_bins]),
        })
        .collect();

    for row in 0..table.n_rows() {
        let s = &mut series[row_series[row]];
        let b = slot[row_bin[row]];
        s.sumw[b] += sumw.values[row].unwrap_or(0.0);
        if let (Some(acc), Some(col)) = (s.sumw2.as_mut(), sumw2) {
            acc[b] += col.values[row].unwrap_or(0.0);
        }
    }

    Ok(Projection { dimension: dim.to_string(), bins, series })
}

/// Distinct labels (by text) in first-appearance order, plus each row's label index.
fn distinct(labels: &[BinLabel]) -> (Vec<BinLabel>, Vec<usize>) {
    let mut unique = Vec::new();
    let mut by_text: HashMap<String, usize> = HashMap::new();
    let rows = labels
        .iter()
        .map(|label| {
            *by_text.entry(label.to_string()).or_insert_with(|| {
                unique.push(label.clone());
                unique.len() - 1
            })
        })
        .collect();
    (unique, rows)
}
