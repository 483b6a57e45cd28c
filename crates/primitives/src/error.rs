//! Validation errors for value types.

use chrono::NaiveDate;

/// Errors raised when constructing a value type from raw data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// A dimension does not match the one implied by another input.
    #[error("shape mismatch for {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
        /// Which input was inspected.
        context: &'static str,
    },

    /// A cell holds NaN or an infinity, which is how missing data shows up.
    #[error("non-finite value {value} for asset {asset} at row {row}")]
    NonFinite {
        /// Asset column holding the value.
        asset: String,
        /// Row index of the value.
        row: usize,
        /// The offending value.
        value: f64,
    },

    /// The same asset appears twice.
    #[error("duplicate asset: {0}")]
    DuplicateAsset(String),

    /// Timestamps are not strictly increasing.
    #[error("dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedDates {
        /// Earlier position.
        previous: NaiveDate,
        /// Later position.
        next: NaiveDate,
    },

    /// Matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Matrix entries (i, j) and (j, i) differ.
    #[error("matrix is not symmetric at ({row}, {col})")]
    NotSymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// A variance on the diagonal is negative.
    #[error("negative variance {value} for asset {asset}")]
    NegativeVariance {
        /// Asset with the negative variance.
        asset: String,
        /// The diagonal value.
        value: f64,
    },
}
