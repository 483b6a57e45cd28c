//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Too few observations for the requested statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Matrix must be square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::InsufficientData { required: 2, actual: 1 };
        assert!(err.to_string().contains('2') && err.to_string().contains('1'));

        let err = MathError::DimensionMismatch { expected: 10, actual: 5 };
        assert!(err.to_string().contains("10") && err.to_string().contains('5'));
    }
}
