//! Error types for price data and charts.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading history or drawing charts
#[derive(Debug, Error)]
pub enum DataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A required CSV column is absent
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No data points to work with
    #[error("Price history is empty")]
    EmptySeries,

    /// SVG rasterisation failed
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
