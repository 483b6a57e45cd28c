//! Error types for volatility decomposition.

use riskdecomp_math::MathError;
use riskdecomp_primitives::DataError;
use riskdecomp_traits::EstimatorError;

/// Errors that can occur during decomposition or rolling computation.
///
/// None of these is transient: every computation is deterministic, so
/// retrying with the same inputs yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Fewer observations than the computation needs.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Weight vector length differs from the covariance dimension.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Portfolio volatility is exactly zero, so contributions are undefined.
    #[error("portfolio volatility is zero; risk contributions are undefined")]
    ZeroVolatility,

    /// Rolling window shorter than two observations.
    #[error("invalid window length {0}: must be at least 2")]
    InvalidWindow(usize),

    /// Weights and covariance columns name different assets at a position.
    #[error("asset mismatch at position {position}: expected {expected}, got {actual}")]
    AssetMismatch {
        /// Position in the asset list.
        position: usize,
        /// Asset in the covariance matrix.
        expected: String,
        /// Asset in the weights.
        actual: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Numerical instability (NaN, Inf or a violated invariant).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Input data failed validation.
    #[error("invalid data: {0}")]
    Data(#[from] DataError),
}

impl From<MathError> for ModelError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual, context: "weights".to_string() }
            }
            MathError::NotSquare { rows, cols } => Self::DimensionMismatch {
                expected: rows,
                actual: cols,
                context: "covariance columns".to_string(),
            },
            MathError::EmptyData => Self::InsufficientData { required: 1, actual: 0 },
            MathError::NumericalInstability(msg) => Self::NumericalInstability(msg),
        }
    }
}

impl From<EstimatorError> for ModelError {
    fn from(err: EstimatorError) -> Self {
        match err {
            EstimatorError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            EstimatorError::DimensionMismatch { expected, actual, context } => {
                Self::DimensionMismatch { expected, actual, context }
            }
            EstimatorError::InvalidEstimate(data) => Self::Data(data),
            EstimatorError::Numerical(msg) => Self::NumericalInstability(msg),
            EstimatorError::InvalidConfig(msg) => Self::InvalidConfig(msg),
        }
    }
}
