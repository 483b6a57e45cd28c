//! Sample covariance estimator over a returns table.

use riskdecomp_math::{MathError, sample_covariance};
use riskdecomp_primitives::{CovarianceMatrix, ReturnsTable};
use riskdecomp_traits::{CovarianceEstimator, EstimatorError};

/// Configuration for the sample covariance estimator.
#[derive(Debug, Clone)]
pub struct SampleCovarianceConfig {
    /// Minimum number of observations; at least 2.
    pub min_observations: usize,
}

impl Default for SampleCovarianceConfig {
    fn default() -> Self {
        Self { min_observations: 2 }
    }
}

/// Unbiased sample covariance estimator.
///
/// Divides centered cross-products by `T - 1`.
#[derive(Debug, Clone)]
pub struct SampleCovarianceEstimator {
    config: SampleCovarianceConfig,
}

impl SampleCovarianceEstimator {
    /// Create a new estimator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SampleCovarianceConfig::default())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SampleCovarianceConfig {
        &self.config
    }
}

impl Default for SampleCovarianceEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CovarianceEstimator for SampleCovarianceEstimator {
    type Config = SampleCovarianceConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn estimate(&self, returns: &ReturnsTable) -> Result<CovarianceMatrix, EstimatorError> {
        if self.config.min_observations < 2 {
            return Err(EstimatorError::InvalidConfig(format!(
                "min_observations must be at least 2, got {}",
                self.config.min_observations
            )));
        }

        let n_obs = returns.n_observations();
        if n_obs < self.config.min_observations {
            return Err(EstimatorError::InsufficientData {
                required: self.config.min_observations,
                actual: n_obs,
            });
        }

        let matrix = sample_covariance(returns.returns()).map_err(|e| match e {
            MathError::InsufficientData { required, actual } => {
                EstimatorError::InsufficientData { required, actual }
            }
            other => EstimatorError::Numerical(other.to_string()),
        })?;

        tracing::debug!(
            n_observations = n_obs,
            n_assets = returns.n_assets(),
            "estimated sample covariance"
        );

        Ok(CovarianceMatrix::new(returns.assets().to_vec(), matrix)?)
    }

    fn min_observations(&self) -> usize {
        self.config.min_observations
    }
}
