//! # fp-core
//!
//! Table-level building blocks for fast-plotter: the in-memory binned table,
//! the CSV/TSV reader, the weight-scheme splitter and the file-name decoder.
//!
//! Nothing here knows about plotting; the reduced tables produced by
//! [`reduce_for_scheme`] are handed to `fp-viz` for projection.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types
pub mod error;

/// Table file-name grammar
pub mod filename;

/// CSV/TSV table reader
pub mod reader;

/// Binned table model
pub mod table;

/// Weight-scheme discovery and per-scheme reduction
pub mod weights;

pub use error::{Error, Result};
pub use filename::{FileNameInfo, decipher_filename};
pub use reader::{read_binned_table, read_binned_table_from};
pub use table::{BinLabel, BinnedTable, IndexColumn, ValueColumn};
pub use weights::{RAW_COUNT, SUMW, SUMW2, reduce_for_scheme, weighting_schemes};
