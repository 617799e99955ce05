//! Error types for fast-plotter

use thiserror::Error;

/// fast-plotter core error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Table structure or cell content error
    #[error("Table error: {0}")]
    Table(String),

    /// Input file name does not follow the table naming grammar
    #[error("File name error: {0}")]
    FileName(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
