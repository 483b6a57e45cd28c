//! Portfolio volatility from weights and a covariance matrix.

use riskdecomp_math::quadratic_form;
use riskdecomp_primitives::{CovarianceMatrix, PortfolioWeights};

use crate::ModelError;

/// Check that weights line up with the covariance columns, position by
/// position.
pub(crate) fn check_alignment(
    weights: &PortfolioWeights,
    covariance: &CovarianceMatrix,
) -> Result<(), ModelError> {
    if weights.len() != covariance.n_assets() {
        return Err(ModelError::DimensionMismatch {
            expected: covariance.n_assets(),
            actual: weights.len(),
            context: "weights".to_string(),
        });
    }

    if let Some((position, (expected, actual))) = covariance
        .assets()
        .iter()
        .zip(weights.assets())
        .enumerate()
        .find(|(_, (expected, actual))| expected != actual)
    {
        return Err(ModelError::AssetMismatch {
            position,
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

/// Portfolio variance `w' S w`, clamped at zero.
///
/// A near-singular covariance matrix can make the quadratic form come out
/// marginally negative; such values are reported as zero.
///
/// # Errors
/// Returns `ModelError::DimensionMismatch` if the weight count differs from
/// the covariance dimension and `ModelError::AssetMismatch` if the assets are
/// not in the same order.
pub fn portfolio_variance(
    weights: &PortfolioWeights,
    covariance: &CovarianceMatrix,
) -> Result<f64, ModelError> {
    check_alignment(weights, covariance)?;
    aligned_variance(weights, covariance)
}

/// `w' S w` for weights already checked with [`check_alignment`].
pub(crate) fn aligned_variance(
    weights: &PortfolioWeights,
    covariance: &CovarianceMatrix,
) -> Result<f64, ModelError> {
    let variance = quadratic_form(weights.weights(), covariance.matrix())?;
    if !variance.is_finite() {
        return Err(ModelError::NumericalInstability(format!(
            "portfolio variance is not finite: {variance}"
        )));
    }
    if variance < 0.0 {
        tracing::trace!(variance, "clamping negative portfolio variance to zero");
    }

    Ok(variance.max(0.0))
}

/// Portfolio volatility `sqrt(w' S w)`.
///
/// # Errors
/// Same as [`portfolio_variance`].
pub fn portfolio_volatility(
    weights: &PortfolioWeights,
    covariance: &CovarianceMatrix,
) -> Result<f64, ModelError> {
    portfolio_variance(weights, covariance).map(f64::sqrt)
}
