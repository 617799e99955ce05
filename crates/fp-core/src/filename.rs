//! Table file names carry the binning dimensions.
//!
//! Grammar (after dropping the directory and a `.csv`/`.tsv`/`.txt`/`.dat`
//! extension):
//!
//! ```text
//! stem := "tbl_" dims ("--" aux)*        fast-carpenter form
//!       | aux "--" dims ("--" aux)*      named form
//! dims := dim ("." dim)*
//! ```
//!
//! Tokens are split on `--`; no token may be empty and no dimension may be
//! empty. `counts--njet.pt.csv` gives binning `[njet, pt]` and aux `[counts]`;
//! `tbl_dataset.njet--weighted.csv` gives binning `[dataset, njet]` and aux
//! `[weighted]`.

use std::path::Path;

use crate::{Error, Result};

const TABLE_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "dat"];
const TOKEN_DELIMITER: &str = "--";
const DIM_DELIMITER: char = '.';
const CARPENTER_PREFIX: &str = "tbl_";

/// Metadata decoded from a table's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameInfo {
    /// Binning dimensions, in file-name order.
    pub binning: Vec<String>,
    /// Remaining descriptive tokens, in file-name order.
    pub aux: Vec<String>,
}

/// Decode binning dimensions and auxiliary tokens from a table path.
pub fn decipher_filename(path: &Path) -> Result<FileNameInfo> {
    let bad = |reason: &str| Error::FileName(format!("{}: {reason}", path.display()));

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| bad("file name is missing or not valid UTF-8"))?;
    let stem = strip_table_extension(name);

    let tokens: Vec<&str> = stem.split(TOKEN_DELIMITER).collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(bad("empty token between '--' delimiters"));
    }

    let (dims, aux): (&str, Vec<&str>) =
        if let Some(dims) = tokens[0].strip_prefix(CARPENTER_PREFIX) {
            (dims, tokens[1..].to_vec())
        } else if tokens.len() >= 2 {
            let mut aux = vec![tokens[0]];
            aux.extend_from_slice(&tokens[2..]);
            (tokens[1], aux)
        } else {
            return Err(bad("expected 'tbl_<dims>[--<aux>]' or '<name>--<dims>[--<aux>]'"));
        };

    let binning: Vec<String> = dims.split(DIM_DELIMITER).map(str::to_string).collect();
    if binning.iter().any(String::is_empty) {
        return Err(bad(&format!("empty binning dimension in '{dims}'")));
    }

    Ok(FileNameInfo { binning, aux: aux.into_iter().map(str::to_string).collect() })
}

fn strip_table_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if TABLE_EXTENSIONS.iter().any(|t| t.eq_ignore_ascii_case(ext)) => stem,
        _ => name,
    }
}
