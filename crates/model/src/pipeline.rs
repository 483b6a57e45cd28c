//! End-to-end risk decomposition over a returns table.

use riskdecomp_primitives::{ContributionReport, CovarianceMatrix, PortfolioWeights, ReturnsTable};
use riskdecomp_traits::CovarianceEstimator;

use crate::{ContributionDecomposer, ModelError, SampleCovarianceEstimator, portfolio_volatility};

/// Chains covariance estimation, portfolio volatility and contribution
/// decomposition.
///
/// The returns table is passed into every call; the pipeline holds only its
/// estimator and decomposer and can be reused across tables.
#[derive(Debug, Clone)]
pub struct RiskPipeline<E = SampleCovarianceEstimator> {
    estimator: E,
    decomposer: ContributionDecomposer,
}

impl RiskPipeline<SampleCovarianceEstimator> {
    /// Pipeline with the sample covariance estimator and default decomposer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_estimator(SampleCovarianceEstimator::new())
    }
}

impl Default for RiskPipeline<SampleCovarianceEstimator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CovarianceEstimator> RiskPipeline<E> {
    /// Pipeline with a custom covariance estimator.
    #[must_use]
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator, decomposer: ContributionDecomposer::new() }
    }

    /// Replace the decomposer.
    #[must_use]
    pub fn with_decomposer(mut self, decomposer: ContributionDecomposer) -> Self {
        self.decomposer = decomposer;
        self
    }

    /// The covariance estimator.
    #[must_use]
    pub const fn estimator(&self) -> &E {
        &self.estimator
    }

    /// The contribution decomposer.
    #[must_use]
    pub const fn decomposer(&self) -> &ContributionDecomposer {
        &self.decomposer
    }

    /// Estimate the covariance of the table's assets.
    ///
    /// # Errors
    /// Returns `ModelError::InsufficientData` if the table has too few rows.
    pub fn covariance(&self, returns: &ReturnsTable) -> Result<CovarianceMatrix, ModelError> {
        Ok(self.estimator.estimate(returns)?)
    }

    /// Portfolio volatility over the table.
    ///
    /// # Errors
    /// Fails if covariance estimation fails or the weights do not line up
    /// with the table's assets.
    pub fn volatility(
        &self,
        returns: &ReturnsTable,
        weights: &PortfolioWeights,
    ) -> Result<f64, ModelError> {
        let covariance = self.covariance(returns)?;
        portfolio_volatility(weights, &covariance)
    }

    /// Estimate covariance and decompose the portfolio's volatility.
    ///
    /// Weights must list the table's assets in column order.
    ///
    /// # Errors
    /// Any error from [`Self::covariance`] or
    /// [`ContributionDecomposer::decompose`].
    pub fn run(
        &self,
        returns: &ReturnsTable,
        weights: &PortfolioWeights,
    ) -> Result<ContributionReport, ModelError> {
        tracing::debug!(
            n_observations = returns.n_observations(),
            n_assets = returns.n_assets(),
            "running risk decomposition"
        );

        let covariance = self.covariance(returns)?;
        self.decomposer.decompose(weights, &covariance)
    }
}
