//! Error types for frame conversion.

use riskdecomp_primitives::DataError;

/// Errors that can occur while converting between frames and value types.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Converted data failed validation.
    #[error("invalid data: {0}")]
    Data(#[from] DataError),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A null, NaN or unparseable cell.
    #[error("missing value in column {column} at row {row}")]
    MissingValue {
        /// Column (or symbol) holding the gap.
        column: String,
        /// Row (or date position) of the gap.
        row: usize,
    },
}
