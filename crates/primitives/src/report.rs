//! Output records handed to reporting collaborators.

use serde::{Deserialize, Serialize};

use crate::{AssetId, Date};

/// One asset's share of portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetContribution {
    /// Asset identifier.
    pub asset: AssetId,
    /// Portfolio weight.
    pub weight: f64,
    /// Sensitivity of portfolio volatility to this asset's weight.
    pub marginal: f64,
    /// Marginal contribution times weight.
    pub component: f64,
    /// Component contribution as a fraction of portfolio volatility.
    pub percentage: f64,
}

/// Decomposition of portfolio volatility into per-asset contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionReport {
    /// Total portfolio standard deviation.
    pub total_volatility: f64,
    /// Contributions in the input asset order.
    pub contributions: Vec<AssetContribution>,
}

impl ContributionReport {
    /// Create a new report.
    #[must_use]
    pub const fn new(total_volatility: f64, contributions: Vec<AssetContribution>) -> Self {
        Self { total_volatility, contributions }
    }

    /// Number of assets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Contribution record for a specific asset.
    #[must_use]
    pub fn get(&self, asset: &AssetId) -> Option<&AssetContribution> {
        self.contributions.iter().find(|c| &c.asset == asset)
    }

    /// Sum of component contributions. Equals `total_volatility` up to rounding.
    #[must_use]
    pub fn component_sum(&self) -> f64 {
        self.contributions.iter().map(|c| c.component).sum()
    }

    /// Sum of percentage contributions. Equals one up to rounding.
    #[must_use]
    pub fn percentage_sum(&self) -> f64 {
        self.contributions.iter().map(|c| c.percentage).sum()
    }

    /// The asset contributing the most volatility.
    #[must_use]
    pub fn largest_contributor(&self) -> Option<&AssetContribution> {
        self.contributions.iter().max_by(|a, b| a.component.total_cmp(&b.component))
    }

    /// Iterate over contributions.
    pub fn iter(&self) -> impl Iterator<Item = &AssetContribution> + '_ {
        self.contributions.iter()
    }
}

/// A statistic value stamped with the last date of its window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    /// Date of the window's last observation.
    pub date: Date,
    /// Statistic computed over the window.
    pub value: f64,
}

/// Sequence of windowed statistic values for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingStatResult {
    /// Asset the series belongs to.
    pub asset: AssetId,
    /// Name of the statistic, e.g. `"std_dev"`.
    pub statistic: String,
    /// Window length.
    pub window: usize,
    /// One point per complete window, in date order.
    pub points: Vec<RollingPoint>,
}

impl RollingStatResult {
    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Statistic values without dates.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value at a specific date.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.points.iter().find(|p| p.date == date).map(|p| p.value)
    }

    /// Most recent point.
    #[must_use]
    pub fn last(&self) -> Option<&RollingPoint> {
        self.points.last()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn contribution(asset: &str, component: f64, percentage: f64) -> AssetContribution {
        AssetContribution {
            asset: asset.into(),
            weight: 0.5,
            marginal: component / 0.5,
            component,
            percentage,
        }
    }

    #[test]
    fn report_sums() {
        let report = ContributionReport::new(
            0.10,
            vec![contribution("A", 0.07, 0.7), contribution("B", 0.03, 0.3)],
        );

        assert_relative_eq!(report.component_sum(), 0.10, epsilon = 1e-12);
        assert_relative_eq!(report.percentage_sum(), 1.0, epsilon = 1e-12);
        assert_eq!(report.largest_contributor().unwrap().asset.as_str(), "A");
        assert_eq!(report.get(&"B".into()).unwrap().component, 0.03);
        assert!(report.get(&"C".into()).is_none());
    }

    #[test]
    fn rolling_result_lookup() {
        let d1 = Date::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = Date::from_ymd_opt(2024, 1, 3).unwrap();
        let result = RollingStatResult {
            asset: "A".into(),
            statistic: "std_dev".to_string(),
            window: 2,
            points: vec![RollingPoint { date: d1, value: 0.1 }, RollingPoint { date: d2, value: 0.2 }],
        };

        assert_eq!(result.len(), 2);
        assert_eq!(result.values(), vec![0.1, 0.2]);
        assert_eq!(result.get(d2), Some(0.2));
        assert_eq!(result.last().unwrap().date, d2);
    }
}
