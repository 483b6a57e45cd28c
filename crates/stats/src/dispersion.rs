//! Dispersion statistics: standard deviation and variance.

use riskdecomp_math::moments;
use riskdecomp_primitives::Moments;
use riskdecomp_traits::WindowStatistic;

/// Sample standard deviation of a window, optionally annualized.
///
/// This is the default statistic for rolling volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StdDev {
    scale: f64,
}

impl StdDev {
    /// Plain per-period standard deviation.
    #[must_use]
    pub const fn new() -> Self {
        Self { scale: 1.0 }
    }

    /// Standard deviation scaled by `sqrt(periods_per_year)`.
    #[must_use]
    pub fn annualized(periods_per_year: f64) -> Self {
        Self { scale: periods_per_year.sqrt() }
    }

    /// Multiplier applied to the per-period value.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStatistic for StdDev {
    fn name(&self) -> &str {
        "std_dev"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        moments(window).ok().and_then(|m| self.from_moments(&m)).unwrap_or(f64::NAN)
    }

    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        moments.sample_std().map(|s| s * self.scale)
    }
}

/// Unbiased sample variance of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Variance;

impl WindowStatistic for Variance {
    fn name(&self) -> &str {
        "variance"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        moments(window).ok().and_then(|m| m.sample_variance()).unwrap_or(f64::NAN)
    }

    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        moments.sample_variance()
    }
}
