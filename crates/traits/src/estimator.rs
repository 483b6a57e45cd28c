//! Covariance estimation trait definitions.

use riskdecomp_primitives::{CovarianceMatrix, DataError, ReturnsTable};

/// Errors that can occur during estimation.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Insufficient data for estimation.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Estimated matrix failed validation.
    #[error("invalid estimate: {0}")]
    InvalidEstimate(#[from] DataError),

    /// Numerical failure inside the estimator.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Trait for estimating an asset covariance matrix from aligned returns.
pub trait CovarianceEstimator: Send + Sync {
    /// Configuration type for this estimator.
    type Config: Default + Clone + Send + Sync;

    /// Create a new estimator with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Estimate the covariance of the table's asset columns.
    ///
    /// The result is labelled with the table's assets in column order.
    ///
    /// # Errors
    /// Returns `EstimatorError` if there are too few observations or the
    /// configuration is invalid.
    fn estimate(&self, returns: &ReturnsTable) -> Result<CovarianceMatrix, EstimatorError>;

    /// Minimum number of observations the estimator accepts.
    fn min_observations(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimator_error_display() {
        let err = EstimatorError::DimensionMismatch {
            expected: 3,
            actual: 2,
            context: "weights".to_string(),
        };
        assert_eq!(err.to_string(), "dimension mismatch for weights: expected 3, got 2");

        let err = EstimatorError::InsufficientData { required: 2, actual: 1 };
        assert_eq!(err.to_string(), "insufficient data: need at least 2 observations, got 1");
    }

    #[test]
    fn estimator_error_from_data_error() {
        let err: EstimatorError = DataError::NotSquare { rows: 2, cols: 3 }.into();
        assert!(matches!(err, EstimatorError::InvalidEstimate(_)));
    }
}
