//! Binned table: index (binning) columns plus weight-scheme value columns.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::{Error, Result};

/// Label of a single bin along one binning dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum BinLabel {
    /// Interval bin as written by pandas, e.g. `[0.0, 10.0)` or `(-inf, 0]`.
    Interval {
        /// Lower edge
        lo: f64,
        /// Upper edge
        hi: f64,
        /// `[` rather than `(`
        closed_left: bool,
        /// `]` rather than `)`
        closed_right: bool,
    },
    /// Plain numeric bin value.
    Number(f64),
    /// Anything else, kept verbatim (dataset names, categories).
    Category(String),
}

impl BinLabel {
    /// Parse a raw cell. Never fails: unparseable text is a category.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if let Some(interval) = parse_interval(s) {
            return interval;
        }
        match s.parse::<f64>() {
            Ok(v) => BinLabel::Number(v),
            Err(_) => BinLabel::Category(s.to_string()),
        }
    }

    /// Position along the dimension, when the label has one.
    ///
    /// Intervals sort by their lower edge, numbers by value; categories have none.
    pub fn sort_value(&self) -> Option<f64> {
        match self {
            BinLabel::Interval { lo, .. } => Some(*lo),
            BinLabel::Number(v) => Some(*v),
            BinLabel::Category(_) => None,
        }
    }

    /// Ordering used when laying out bins: positioned labels first, ascending,
    /// then categories (which compare equal so a stable sort keeps their order).
    pub fn layout_cmp(&self, other: &Self) -> Ordering {
        match (self.sort_value(), other.sort_value()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn parse_interval(s: &str) -> Option<BinLabel> {
    let closed_left = match s.chars().next()? {
        '[' => true,
        '(' => false,
        _ => return None,
    };
    let closed_right = match s.chars().last()? {
        ']' => true,
        ')' => false,
        _ => return None,
    };
    let inner = s.get(1..s.len() - 1)?;
    let (lo, hi) = inner.split_once(',')?;
    let lo = lo.trim().parse::<f64>().ok()?;
    let hi = hi.trim().parse::<f64>().ok()?;
    Some(BinLabel::Interval { lo, hi, closed_left, closed_right })
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinLabel::Interval { lo, hi, closed_left, closed_right } => {
                let open = if *closed_left { '[' } else { '(' };
                let close = if *closed_right { ']' } else { ')' };
                write!(f, "{open}{lo}, {hi}{close}")
            }
            BinLabel::Number(v) => write!(f, "{v}"),
            BinLabel::Category(s) => f.write_str(s),
        }
    }
}

/// A binning (index) column.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    /// Column name
    pub name: String,
    /// One label per row
    pub labels: Vec<BinLabel>,
}

/// A numeric value column; `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn {
    /// Column name
    pub name: String,
    /// One value per row
    pub values: Vec<Option<f64>>,
}

impl ValueColumn {
    /// Build a column from its name and values.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), values }
    }
}

/// Rows are bins; index columns identify the bin, value columns carry the
/// weight-scheme quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedTable {
    index: Vec<IndexColumn>,
    values: Vec<ValueColumn>,
    n_rows: usize,
}

impl BinnedTable {
    /// Assemble a table, checking that column lengths agree and names are unique.
    pub fn new(index: Vec<IndexColumn>, values: Vec<ValueColumn>) -> Result<Self> {
        let n_rows = index
            .first()
            .map(|c| c.labels.len())
            .or_else(|| values.first().map(|c| c.values.len()))
            .unwrap_or(0);

        let mut seen = HashSet::new();
        for (name, len) in index
            .iter()
            .map(|c| (&c.name, c.labels.len()))
            .chain(values.iter().map(|c| (&c.name, c.values.len())))
        {
            if len != n_rows {
                return Err(Error::Table(format!(
                    "column '{name}' has {len} rows, expected {n_rows}"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::Table(format!("duplicate column name '{name}'")));
            }
        }

        Ok(Self { index, values, n_rows })
    }

    /// True for names that hold weight-scheme values rather than bin labels:
    /// the raw count `n` and anything of the form `<scheme>:<metric>`.
    pub fn is_value_column_name(name: &str) -> bool {
        name == crate::weights::RAW_COUNT || name.contains(crate::weights::SCHEME_SEPARATOR)
    }

    /// Number of rows (bins).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Binning columns, in file order.
    pub fn index_columns(&self) -> &[IndexColumn] {
        &self.index
    }

    /// Value columns, in file order.
    pub fn value_columns(&self) -> &[ValueColumn] {
        &self.values
    }

    /// Look up a binning column by name.
    pub fn index_column(&self, name: &str) -> Option<&IndexColumn> {
        self.index.iter().find(|c| c.name == name)
    }

    /// Look up a value column by name.
    pub fn value_column(&self, name: &str) -> Option<&ValueColumn> {
        self.values.iter().find(|c| c.name == name)
    }

    /// All column names: index columns first, then value columns.
    pub fn column_names(&self) -> Vec<&str> {
        self.index
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.values.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Same index, different value columns. Lengths must already match.
    pub(crate) fn with_values(&self, values: Vec<ValueColumn>) -> Self {
        debug_assert!(values.iter().all(|c| c.values.len() == self.n_rows));
        Self { index: self.index.clone(), values, n_rows: self.n_rows }
    }
}
