//! Covariance matrix definition.

use ndarray::Array2;

use crate::{AssetId, DataError};

/// Relative tolerance used when checking symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Symmetric N x N covariance matrix labelled with its assets.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    assets: Vec<AssetId>,
    matrix: Array2<f64>,
}

impl CovarianceMatrix {
    /// Create a covariance matrix.
    ///
    /// # Errors
    /// Returns `DataError` if the matrix is not square, does not match the
    /// asset count, contains non-finite values, is not symmetric, or has a
    /// negative variance on its diagonal.
    pub fn new(assets: Vec<AssetId>, matrix: Array2<f64>) -> Result<Self, DataError> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(DataError::NotSquare { rows, cols });
        }
        if rows != assets.len() {
            return Err(DataError::ShapeMismatch {
                expected: assets.len(),
                actual: rows,
                context: "covariance",
            });
        }

        for ((row, col), &value) in matrix.indexed_iter() {
            if !value.is_finite() {
                return Err(DataError::NonFinite { asset: assets[col].to_string(), row, value });
            }
            if col > row {
                let mirror = matrix[[col, row]];
                let scale = value.abs().max(mirror.abs()).max(1.0);
                if (value - mirror).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(DataError::NotSymmetric { row, col });
                }
            }
        }

        for (i, asset) in assets.iter().enumerate() {
            let value = matrix[[i, i]];
            if value < 0.0 {
                return Err(DataError::NegativeVariance { asset: asset.to_string(), value });
            }
        }

        Ok(Self { assets, matrix })
    }

    /// Asset identifiers in row/column order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Number of assets (N).
    #[must_use]
    pub const fn n_assets(&self) -> usize {
        self.assets.len()
    }

    /// Covariance between the assets at positions `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.matrix.get([i, j]).copied()
    }

    /// Covariance between two assets by identifier.
    #[must_use]
    pub fn between(&self, a: &AssetId, b: &AssetId) -> Option<f64> {
        let i = self.assets.iter().position(|x| x == a)?;
        let j = self.assets.iter().position(|x| x == b)?;
        self.get(i, j)
    }

    /// Variance of the asset at position `i`.
    #[must_use]
    pub fn variance(&self, i: usize) -> Option<f64> {
        self.get(i, i)
    }

    /// Standard deviation of the asset at position `i`.
    #[must_use]
    pub fn volatility(&self, i: usize) -> Option<f64> {
        self.variance(i).map(f64::sqrt)
    }
}
