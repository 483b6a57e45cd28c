//! Aligned return observations.

use std::collections::HashSet;

use ndarray::{Array2, ArrayView1};

use crate::{AssetId, DataError, Date};

fn validate_dates(dates: &[Date]) -> Result<(), DataError> {
    for pair in dates.windows(2) {
        if pair[1] <= pair[0] {
            return Err(DataError::UnorderedDates { previous: pair[0], next: pair[1] });
        }
    }
    Ok(())
}

/// Ordered return observations for a single asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReturnSeries {
    asset: AssetId,
    dates: Vec<Date>,
    returns: Vec<f64>,
}

impl AssetReturnSeries {
    /// Create a return series.
    ///
    /// # Errors
    /// Returns `DataError` if the lengths differ, a return is not finite, or
    /// the dates are not strictly increasing.
    pub fn new(asset: AssetId, dates: Vec<Date>, returns: Vec<f64>) -> Result<Self, DataError> {
        if dates.len() != returns.len() {
            return Err(DataError::ShapeMismatch {
                expected: dates.len(),
                actual: returns.len(),
                context: "returns",
            });
        }
        if let Some((row, &value)) = returns.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(DataError::NonFinite { asset: asset.to_string(), row, value });
        }
        validate_dates(&dates)?;

        Ok(Self { asset, dates, returns })
    }

    /// The asset this series belongs to.
    #[must_use]
    pub const fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Observation dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return values aligned with [`Self::dates`].
    #[must_use]
    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.returns.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Iterate over `(date, return)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.returns.iter().copied())
    }
}

/// Immutable table of returns on a common date grid.
///
/// Rows are dates, columns are assets. Every cell is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsTable {
    dates: Vec<Date>,
    assets: Vec<AssetId>,
    returns: Array2<f64>,
}

impl ReturnsTable {
    /// Create a returns table.
    ///
    /// # Arguments
    /// * `dates` - Observation dates, strictly increasing (T,)
    /// * `assets` - Asset identifiers, one per column (N,)
    /// * `returns` - Return matrix (T x N)
    ///
    /// # Errors
    /// Returns `DataError` on shape mismatch, duplicate assets, unordered
    /// dates or any non-finite cell.
    pub fn new(
        dates: Vec<Date>,
        assets: Vec<AssetId>,
        returns: Array2<f64>,
    ) -> Result<Self, DataError> {
        if returns.nrows() != dates.len() {
            return Err(DataError::ShapeMismatch {
                expected: dates.len(),
                actual: returns.nrows(),
                context: "return rows",
            });
        }
        if returns.ncols() != assets.len() {
            return Err(DataError::ShapeMismatch {
                expected: assets.len(),
                actual: returns.ncols(),
                context: "return columns",
            });
        }

        let mut seen = HashSet::with_capacity(assets.len());
        for asset in &assets {
            if !seen.insert(asset) {
                return Err(DataError::DuplicateAsset(asset.to_string()));
            }
        }

        for ((row, col), &value) in returns.indexed_iter() {
            if !value.is_finite() {
                return Err(DataError::NonFinite { asset: assets[col].to_string(), row, value });
            }
        }

        validate_dates(&dates)?;

        Ok(Self { dates, assets, returns })
    }

    /// Build a table from per-asset columns sharing one date grid.
    ///
    /// # Errors
    /// Returns `DataError` if any column length differs from `dates`.
    pub fn from_columns(
        dates: Vec<Date>,
        columns: Vec<(AssetId, Vec<f64>)>,
    ) -> Result<Self, DataError> {
        let n_obs = dates.len();
        let mut assets = Vec::with_capacity(columns.len());
        let mut returns = Array2::zeros((n_obs, columns.len()));

        for (j, (asset, values)) in columns.into_iter().enumerate() {
            if values.len() != n_obs {
                return Err(DataError::ShapeMismatch {
                    expected: n_obs,
                    actual: values.len(),
                    context: "asset column",
                });
            }
            for (i, value) in values.into_iter().enumerate() {
                returns[[i, j]] = value;
            }
            assets.push(asset);
        }

        Self::new(dates, assets, returns)
    }

    /// Observation dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Asset identifiers in column order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Return matrix (T x N).
    #[must_use]
    pub const fn returns(&self) -> &Array2<f64> {
        &self.returns
    }

    /// Number of observations (T).
    #[must_use]
    pub const fn n_observations(&self) -> usize {
        self.dates.len()
    }

    /// Number of assets (N).
    #[must_use]
    pub const fn n_assets(&self) -> usize {
        self.assets.len()
    }

    /// Column index of an asset.
    #[must_use]
    pub fn asset_index(&self, asset: &AssetId) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }

    /// Returns of the asset at a column index.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.n_assets()).then(|| self.returns.column(index))
    }

    /// Extract one asset's return series.
    #[must_use]
    pub fn series(&self, asset: &AssetId) -> Option<AssetReturnSeries> {
        self.asset_index(asset).map(|j| AssetReturnSeries {
            asset: asset.clone(),
            dates: self.dates.clone(),
            returns: self.returns.column(j).to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn dates(n: u32) -> Vec<Date> {
        (1..=n).map(|d| Date::from_ymd_opt(2024, 1, d).unwrap()).collect()
    }

    #[test]
    fn table_dimensions() {
        let table = ReturnsTable::new(
            dates(3),
            vec!["A".into(), "B".into()],
            array![[0.01, 0.02], [-0.01, 0.0], [0.03, -0.02]],
        )
        .unwrap();

        assert_eq!(table.n_observations(), 3);
        assert_eq!(table.n_assets(), 2);
        assert_eq!(table.asset_index(&"B".into()), Some(1));
        assert_eq!(table.column(0).unwrap().to_vec(), vec![0.01, -0.01, 0.03]);
        assert!(table.column(2).is_none());
    }

    #[test]
    fn table_series_extraction() {
        let table = ReturnsTable::from_columns(
            dates(2),
            vec![("A".into(), vec![0.1, 0.2]), ("B".into(), vec![0.3, 0.4])],
        )
        .unwrap();

        let series = table.series(&"B".into()).unwrap();
        assert_eq!(series.asset().as_str(), "B");
        assert_eq!(series.returns(), &[0.3, 0.4]);
        assert_eq!(series.dates(), table.dates());
        assert!(table.series(&"C".into()).is_none());
    }

    #[test]
    fn table_rejects_missing_values() {
        let err = ReturnsTable::new(dates(2), vec!["A".into()], array![[0.01], [f64::NAN]])
            .unwrap_err();
        assert!(matches!(err, DataError::NonFinite { row: 1, .. }));
    }

    #[test]
    fn table_rejects_duplicate_assets() {
        let err = ReturnsTable::new(dates(1), vec!["A".into(), "A".into()], array![[0.0, 0.0]])
            .unwrap_err();
        assert_eq!(err, DataError::DuplicateAsset("A".to_string()));
    }

    #[test]
    fn table_rejects_unordered_dates() {
        let mut d = dates(2);
        d.reverse();
        let err = ReturnsTable::new(d, vec!["A".into()], array![[0.0], [0.0]]).unwrap_err();
        assert!(matches!(err, DataError::UnorderedDates { .. }));
    }

    #[test]
    fn table_rejects_shape_mismatch() {
        let err = ReturnsTable::from_columns(dates(3), vec![("A".into(), vec![0.0, 0.0])])
            .unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn series_iter_pairs() {
        let series =
            AssetReturnSeries::new("A".into(), dates(2), vec![0.01, -0.02]).unwrap();
        let pairs: Vec<_> = series.iter().collect();
        assert_eq!(pairs[1], (Date::from_ymd_opt(2024, 1, 2).unwrap(), -0.02));
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
    }
}
