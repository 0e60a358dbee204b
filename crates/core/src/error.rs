//! Error types for pitfill

use thiserror::Error;

/// Main error type for pitfill operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Raw band holds {actual} bytes, expected {expected}")]
    BandLength { expected: u64, actual: u64 },

    #[error("Malformed header at line {line}: {reason}")]
    Header { line: usize, reason: String },

    #[error("Raster has no valid (non-null) cells")]
    NoValidData,

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Internal logic defect. Never a caller error, never recovered from.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pitfill operations
pub type Result<T> = std::result::Result<T, Error>;
