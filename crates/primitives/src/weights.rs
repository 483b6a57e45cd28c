//! Portfolio weight definitions.

use ndarray::Array1;

use crate::{AssetId, DataError};

/// Portfolio weights paired with their asset identifiers.
///
/// Weights are arbitrary reals; they are not required to sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioWeights {
    assets: Vec<AssetId>,
    weights: Array1<f64>,
}

impl PortfolioWeights {
    /// Create weights from assets and a weight vector.
    ///
    /// # Errors
    /// Returns `DataError` if lengths differ or a weight is not finite.
    pub fn new(assets: Vec<AssetId>, weights: Array1<f64>) -> Result<Self, DataError> {
        if assets.len() != weights.len() {
            return Err(DataError::ShapeMismatch {
                expected: assets.len(),
                actual: weights.len(),
                context: "weights",
            });
        }
        if let Some((row, &value)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(DataError::NonFinite { asset: assets[row].to_string(), row, value });
        }
        Ok(Self { assets, weights })
    }

    /// Create weights from `(asset, weight)` pairs, preserving their order.
    ///
    /// # Errors
    /// Returns `DataError` if a weight is not finite.
    pub fn from_pairs<I, A>(pairs: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (A, f64)>,
        A: Into<AssetId>,
    {
        let (assets, weights): (Vec<AssetId>, Vec<f64>) =
            pairs.into_iter().map(|(a, w)| (a.into(), w)).unzip();
        Self::new(assets, Array1::from_vec(weights))
    }

    /// Equal weights summing to one.
    #[must_use]
    pub fn equal(assets: Vec<AssetId>) -> Self {
        let n = assets.len();
        let weights = if n == 0 { Array1::zeros(0) } else { Array1::from_elem(n, 1.0 / n as f64) };
        Self { assets, weights }
    }

    /// Multiply every weight by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self { assets: self.assets.clone(), weights: &self.weights * factor }
    }

    /// Asset identifiers in weight order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Weight vector.
    #[must_use]
    pub const fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Weight for a specific asset.
    #[must_use]
    pub fn get(&self, asset: &AssetId) -> Option<f64> {
        self.assets.iter().position(|a| a == asset).map(|i| self.weights[i])
    }

    /// Sum of weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.sum()
    }

    /// Iterate over `(asset, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, f64)> + '_ {
        self.assets.iter().zip(self.weights.iter().copied())
    }

    /// Number of assets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
