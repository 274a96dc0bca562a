//! Error types for loading and exporting 2-opt data.
//!
//! The optimizer itself never fails on well-formed input; everything here
//! belongs to the I/O layer around it.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[derive(Debug, Error)]
pub enum TspError {
    /// The input resource could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write (matrix or report export) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource holds no dimension line at all.
    #[error("input is empty, expected the number of locations on the first line")]
    EmptyInput,

    #[error("invalid dimension '{value}', expected a positive integer")]
    InvalidDimension { value: String },

    #[error("missing row {row}, expected {expected} rows")]
    MissingRow { row: usize, expected: usize },

    #[error("row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    /// Distances must be finite and non-negative.
    #[error("row {row}, column {column}: invalid distance {value}")]
    InvalidDistance { row: usize, column: usize, value: f64 },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}
