//! Read binned tables from delimited text.
//!
//! Every column whose name is `n` or contains `:` is a value column and must
//! hold finite numbers (empty cells and `nan` are missing). All other columns are
//! binning columns whose cells become [`BinLabel`]s.

use std::io::Read;
use std::path::Path;

use crate::table::{BinLabel, BinnedTable, IndexColumn, ValueColumn};
use crate::{Error, Result};

/// Read a `.csv`/`.txt`/`.dat` (comma) or `.tsv` (tab) table file.
pub fn read_binned_table(path: &Path) -> Result<BinnedTable> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
    let delimiter = match ext.as_str() {
        "csv" | "txt" | "dat" => b',',
        "tsv" => b'\t',
        _ => {
            return Err(Error::Table(format!(
                "unsupported table extension '.{ext}' for {}: expected .csv, .tsv, .txt or .dat",
                path.display()
            )));
        }
    };

    let file = std::fs::File::open(path)?;
    let table = read_binned_table_from(file, delimiter)?;
    tracing::debug!(
        "read {} rows x {} columns from {}",
        table.n_rows(),
        table.column_names().len(),
        path.display()
    );
    Ok(table)
}

/// Read a table with a header row from any reader.
pub fn read_binned_table_from<R: Read>(reader: R, delimiter: u8) -> Result<BinnedTable> {
    let mut rdr = csv::ReaderBuilder::new().delimiter(delimiter).has_headers(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(Error::Table("table has no columns".into()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let mut index = Vec::new();
    let mut values = Vec::new();
    for (name, column) in headers.into_iter().zip(cells) {
        if BinnedTable::is_value_column_name(&name) {
            let parsed = column
                .iter()
                .enumerate()
                .map(|(row, cell)| parse_value(&name, row, cell))
                .collect::<Result<Vec<_>>>()?;
            values.push(ValueColumn::new(name, parsed));
        } else {
            let labels = column.iter().map(|cell| BinLabel::parse(cell)).collect();
            index.push(IndexColumn { name, labels });
        }
    }

    if values.is_empty() {
        tracing::warn!("table has no weight columns (expected 'n' or '<scheme>:<metric>')");
    }

    BinnedTable::new(index, values)
}

fn parse_value(column: &str, row: usize, cell: &str) -> Result<Option<f64>> {
    let s = cell.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value = s.parse::<f64>().map_err(|_| {
        Error::Table(format!("column '{column}' row {}: cannot parse '{s}' as a number", row + 1))
    })?;
    if !value.is_finite() {
        return Err(Error::Table(format!(
            "column '{column}' row {}: value '{s}' is not finite",
            row + 1
        )));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const COUNTS: &str = r#"njet,pt,dataset,n,w:central
0,"[0.0, 10.0)",data,4,
0,"[0.0, 10.0)",ttbar,10,2.5
1,"[10.0, 20.0)",data,2,1.0
1,"[10.0, 20.0)",ttbar,,nan
"#;

    #[test]
    fn splits_index_and_value_columns() {
        let t = read_binned_table_from(COUNTS.as_bytes(), b',').unwrap();
        assert_eq!(t.n_rows(), 4);
        let index: Vec<&str> = t.index_columns().iter().map(|c| c.name.as_str()).collect();
        let values: Vec<&str> = t.value_columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(index, vec!["njet", "pt", "dataset"]);
        assert_eq!(values, vec!["n", "w:central"]);
    }

    #[test]
    fn parses_cells() {
        let t = read_binned_table_from(COUNTS.as_bytes(), b',').unwrap();
        let n = t.value_column("n").unwrap();
        assert_eq!(n.values, vec![Some(4.0), Some(10.0), Some(2.0), None]);
        let w = t.value_column("w:central").unwrap();
        assert_eq!(w.values[0], None);
        assert_abs_diff_eq!(w.values[1].unwrap(), 2.5);
        assert_eq!(w.values[3], None);

        let pt = t.index_column("pt").unwrap();
        assert_eq!(pt.labels[2].sort_value(), Some(10.0));
        let ds = t.index_column("dataset").unwrap();
        assert_eq!(ds.labels[1], BinLabel::Category("ttbar".into()));
    }

    #[test]
    fn tab_separated() {
        let text = "x\tn\n1\t5\n2\t6\n";
        let t = read_binned_table_from(text.as_bytes(), b'\t').unwrap();
        assert_eq!(t.value_column("n").unwrap().values, vec![Some(5.0), Some(6.0)]);
    }

    #[test]
    fn bad_number_names_row_and_column() {
        let text = "x,n\n1,5\n2,five\n";
        let err = read_binned_table_from(text.as_bytes(), b',').unwrap_err();
        assert!(err.to_string().contains("column 'n' row 2"), "{err}");
    }

    #[test]
    fn infinite_cells_are_rejected() {
        for cell in ["inf", "-Infinity", "1e400"] {
            let text = format!("x,n\n1,5\n2,{cell}\n");
            let err = read_binned_table_from(text.as_bytes(), b',').unwrap_err();
            assert!(err.to_string().contains("column 'n' row 2"), "{err}");
            assert!(err.to_string().contains("not finite"), "{err}");
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let text = "x,n\n1,5,7\n";
        assert!(matches!(read_binned_table_from(text.as_bytes(), b','), Err(Error::Csv(_))));
    }

    #[test]
    fn unsupported_extension() {
        let err = read_binned_table(Path::new("table.h5")).unwrap_err();
        assert!(err.to_string().contains("unsupported table extension '.h5'"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_binned_table(Path::new("/nonexistent/dir/tbl_x.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
