//! Weight schemes are encoded in value-column names: the raw count is the bare
//! column `n`, every other scheme owns the columns prefixed `<scheme>:`.

use std::collections::BTreeSet;

use crate::table::{BinnedTable, ValueColumn};

/// Name of the raw (unweighted) count column and of its scheme.
pub const RAW_COUNT: &str = "n";

/// Reduced-table name of the sum of weights.
pub const SUMW: &str = "sumw";

/// Reduced-table name of the sum of squared weights.
pub const SUMW2: &str = "sumw2";

/// Separator between scheme and metric in a value-column name.
pub const SCHEME_SEPARATOR: char = ':';

/// Scheme a value column belongs to, or `None` for index columns.
pub fn scheme_of(column: &str) -> Option<&str> {
    if column == RAW_COUNT {
        return Some(RAW_COUNT);
    }
    column.split_once(SCHEME_SEPARATOR).map(|(scheme, _)| scheme)
}

/// Distinct weighting schemes present in the table, sorted by name.
pub fn weighting_schemes(table: &BinnedTable) -> Vec<String> {
    table
        .value_columns()
        .iter()
        .filter_map(|c| scheme_of(&c.name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Project the table onto one weighting scheme.
///
/// The raw-count scheme becomes `sumw` plus an identical `sumw2` (counts carry
/// no separate variance). Any other scheme keeps the columns prefixed
/// `<scheme>:` with the prefix stripped; missing cells fall back to the raw
/// count of the same row when an `n` column exists and stay missing otherwise.
///
/// A scheme that matches nothing yields a table without value columns.
pub fn reduce_for_scheme(table: &BinnedTable, scheme: &str) -> BinnedTable {
    if scheme == RAW_COUNT {
        return reduce_raw_count(table);
    }

    let prefix = format!("{scheme}{SCHEME_SEPARATOR}");
    let raw = table.value_column(RAW_COUNT);

    let columns = table
        .value_columns()
        .iter()
        .filter_map(|col| {
            let stripped = col.name.strip_prefix(&prefix)?;
            let values = match raw {
                Some(raw) => col
                    .values
                    .iter()
                    .zip(&raw.values)
                    .map(|(value, fallback)| value.or(*fallback))
                    .collect(),
                None => col.values.clone(),
            };
            Some(ValueColumn::new(stripped, values))
        })
        .collect();

    table.with_values(columns)
}

fn reduce_raw_count(table: &BinnedTable) -> BinnedTable {
    let columns = match table.value_column(RAW_COUNT) {
        Some(count) => vec![
            ValueColumn::new(SUMW, count.values.clone()),
            ValueColumn::new(SUMW2, count.values.clone()),
        ],
        None => Vec::new(),
    };
    table.with_values(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{BinLabel, IndexColumn};

    fn table(values: Vec<ValueColumn>) -> BinnedTable {
        let rows = values.first().map(|c| c.values.len()).unwrap_or(0);
        let index = vec![IndexColumn {
            name: "njet".into(),
            labels: (0..rows).map(|i| BinLabel::Number(i as f64)).collect(),
        }];
        BinnedTable::new(index, values).unwrap()
    }

    #[test]
    fn schemes_are_distinct_and_sorted() {
        let t = table(vec![
            ValueColumn::new("w:sumw2", vec![Some(1.0)]),
            ValueColumn::new("n", vec![Some(1.0)]),
            ValueColumn::new("w:sumw", vec![Some(1.0)]),
            ValueColumn::new("ww:sumw", vec![Some(1.0)]),
        ]);
        assert_eq!(weighting_schemes(&t), vec!["n", "w", "ww"]);
    }

    #[test]
    fn raw_count_duplicates_into_sumw2() {
        let t = table(vec![
            ValueColumn::new("n", vec![Some(3.0), None, Some(7.0)]),
            ValueColumn::new("w:sumw", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ]);
        let r = reduce_for_scheme(&t, RAW_COUNT);
        let names: Vec<&str> = r.value_columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![SUMW, SUMW2]);
        assert_eq!(r.value_column(SUMW).unwrap().values, r.value_column(SUMW2).unwrap().values);
        assert_eq!(r.value_column(SUMW).unwrap().values, vec![Some(3.0), None, Some(7.0)]);
        assert_eq!(r.index_columns(), t.index_columns());
    }

    #[test]
    fn weighted_missing_cells_fall_back_to_raw_count() {
        let t = table(vec![
            ValueColumn::new("n", vec![Some(4.0), Some(5.0), Some(6.0)]),
            ValueColumn::new("w:central", vec![Some(0.5), None, Some(1.5)]),
        ]);
        let r = reduce_for_scheme(&t, "w");
        assert_eq!(r.value_columns().len(), 1);
        let central = r.value_column("central").unwrap();
        assert_eq!(central.values, vec![Some(0.5), Some(5.0), Some(1.5)]);
    }

    #[test]
    fn weighted_missing_cells_stay_missing_without_raw_count() {
        let t = table(vec![ValueColumn::new("w:sumw", vec![None, Some(2.0)])]);
        let r = reduce_for_scheme(&t, "w");
        assert_eq!(r.value_column(SUMW).unwrap().values, vec![None, Some(2.0)]);
    }

    #[test]
    fn prefix_match_is_exact() {
        let t = table(vec![
            ValueColumn::new("w:sumw", vec![Some(1.0)]),
            ValueColumn::new("ww:sumw", vec![Some(2.0)]),
            ValueColumn::new("sumw:central", vec![Some(3.0)]),
        ]);
        let r = reduce_for_scheme(&t, "w");
        assert_eq!(r.value_columns().len(), 1);
        assert_eq!(r.value_column(SUMW).unwrap().values, vec![Some(1.0)]);

        let r = reduce_for_scheme(&t, "sumw");
        let names: Vec<&str> = r.value_columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["central"]);
    }

    #[test]
    fn unknown_scheme_gives_no_value_columns() {
        let t = table(vec![ValueColumn::new("n", vec![Some(1.0)])]);
        let r = reduce_for_scheme(&t, "nominal");
        assert!(r.value_columns().is_empty());
        assert_eq!(r.n_rows(), 1);
    }

    #[test]
    fn raw_count_scheme_without_count_column_is_empty() {
        let t = table(vec![ValueColumn::new("w:sumw", vec![Some(1.0)])]);
        assert!(reduce_for_scheme(&t, RAW_COUNT).value_columns().is_empty());
    }
}
