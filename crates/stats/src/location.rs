//! Location and shape statistics.

use riskdecomp_math::{mean, skewness};
use riskdecomp_primitives::Moments;
use riskdecomp_traits::WindowStatistic;

/// Arithmetic mean of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean;

impl WindowStatistic for Mean {
    fn name(&self) -> &str {
        "mean"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        mean(window).unwrap_or(f64::NAN)
    }

    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        (moments.count > 0).then_some(moments.mean)
    }
}

/// Moment coefficient of skewness of a window.
///
/// Needs the third central moment, so it is always recomputed per window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Skewness;

impl WindowStatistic for Skewness {
    fn name(&self) -> &str {
        "skewness"
    }

    fn compute(&self, window: &[f64]) -> f64 {
        skewness(window).unwrap_or(f64::NAN)
    }
}
