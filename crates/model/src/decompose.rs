//! Decomposition of portfolio volatility into per-asset contributions.
//!
//! For weights `w`, covariance `S` and portfolio volatility `sigma`:
//!
//! - marginal contribution: `(w' S)_i / sigma`
//! - component contribution: `w_i * marginal_i`
//! - percentage contribution: `component_i / sigma`
//!
//! Components sum to `sigma` and percentages sum to one (Euler's theorem for
//! the degree-one homogeneous function `sigma(w)`).

use riskdecomp_math::weighted_row;
use riskdecomp_primitives::{
    AssetContribution, ContributionReport, CovarianceMatrix, PortfolioWeights,
};

use crate::{
    ModelError,
    volatility::{aligned_variance, check_alignment},
};

/// Configuration for the contribution decomposer.
#[derive(Debug, Clone)]
pub struct DecomposerConfig {
    /// Relative tolerance for the summation invariants.
    pub tolerance: f64,
    /// Whether to check that components sum to the total volatility and
    /// percentages sum to one before returning.
    pub verify_invariants: bool,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self { tolerance: 1e-8, verify_invariants: true }
    }
}

/// Computes marginal, component and percentage risk contributions.
#[derive(Debug, Clone)]
pub struct ContributionDecomposer {
    config: DecomposerConfig,
}

impl ContributionDecomposer {
    /// Create a new decomposer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecomposerConfig::default())
    }

    /// Create a new decomposer with the given configuration.
    #[must_use]
    pub const fn with_config(config: DecomposerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Decompose the volatility of a weighted portfolio.
    ///
    /// Contributions come back in the covariance matrix's asset order, each
    /// paired with its asset id.
    ///
    /// # Errors
    /// - `ModelError::DimensionMismatch` if the weight count differs from the
    ///   covariance dimension
    /// - `ModelError::AssetMismatch` if the assets are in a different order
    /// - `ModelError::ZeroVolatility` if the portfolio has no volatility
    pub fn decompose(
        &self,
        weights: &PortfolioWeights,
        covariance: &CovarianceMatrix,
    ) -> Result<ContributionReport, ModelError> {
        self.validate_config()?;
        check_alignment(weights, covariance)?;
        let total_volatility = aligned_variance(weights, covariance)?.sqrt();
        self.decompose_aligned(weights, covariance, total_volatility)
    }

    /// Decompose using a portfolio volatility computed by the caller.
    ///
    /// `total_volatility` must be `sqrt(w' S w)` for the same inputs; with
    /// `verify_invariants` enabled an inconsistent value is rejected.
    ///
    /// # Errors
    /// Same as [`Self::decompose`], plus `ModelError::NumericalInstability`
    /// if `total_volatility` is negative or not finite, or an invariant check
    /// fails.
    pub fn decompose_with_volatility(
        &self,
        weights: &PortfolioWeights,
        covariance: &CovarianceMatrix,
        total_volatility: f64,
    ) -> Result<ContributionReport, ModelError> {
        self.validate_config()?;
        check_alignment(weights, covariance)?;
        self.decompose_aligned(weights, covariance, total_volatility)
    }

    fn decompose_aligned(
        &self,
        weights: &PortfolioWeights,
        covariance: &CovarianceMatrix,
        total_volatility: f64,
    ) -> Result<ContributionReport, ModelError> {
        if !total_volatility.is_finite() || total_volatility < 0.0 {
            return Err(ModelError::NumericalInstability(format!(
                "invalid portfolio volatility: {total_volatility}"
            )));
        }
        if total_volatility == 0.0 {
            return Err(ModelError::ZeroVolatility);
        }

        let row = weighted_row(weights.weights(), covariance.matrix())?;

        let contributions: Vec<AssetContribution> = weights
            .iter()
            .zip(row.iter())
            .map(|((asset, weight), &exposure)| {
                let marginal = exposure / total_volatility;
                let component = marginal * weight;
                AssetContribution {
                    asset: asset.clone(),
                    weight,
                    marginal,
                    component,
                    percentage: component / total_volatility,
                }
            })
            .collect();

        let report = ContributionReport::new(total_volatility, contributions);

        if self.config.verify_invariants {
            self.verify(&report)?;
        }

        tracing::debug!(
            n_assets = report.len(),
            total_volatility,
            "decomposed portfolio volatility"
        );

        Ok(report)
    }

    fn validate_config(&self) -> Result<(), ModelError> {
        let tol = self.config.tolerance;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {tol}"
            )));
        }
        Ok(())
    }

    fn verify(&self, report: &ContributionReport) -> Result<(), ModelError> {
        let tol = self.config.tolerance;
        let total = report.total_volatility;

        let component_sum = report.component_sum();
        if (component_sum - total).abs() > tol * total {
            return Err(ModelError::NumericalInstability(format!(
                "component contributions sum to {component_sum}, expected {total}"
            )));
        }

        let percentage_sum = report.percentage_sum();
        if (percentage_sum - 1.0).abs() > tol {
            return Err(ModelError::NumericalInstability(format!(
                "percentage contributions sum to {percentage_sum}, expected 1"
            )));
        }

        Ok(())
    }
}

impl Default for ContributionDecomposer {
    fn default() -> Self {
        Self::new()
    }
}
