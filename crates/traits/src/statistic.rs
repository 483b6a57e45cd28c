//! Windowed statistic trait definitions.

use riskdecomp_primitives::Moments;

/// An aggregate evaluated over a fixed-size window of observations.
///
/// Implementations must be pure: the value depends only on the slice they
/// are handed, so windows can be evaluated in any order or in parallel.
pub trait WindowStatistic: Send + Sync {
    /// Short machine-friendly name, e.g. `"std_dev"`.
    fn name(&self) -> &str;

    /// Compute the statistic over one window.
    ///
    /// `window` always holds at least two observations.
    fn compute(&self, window: &[f64]) -> f64;

    /// Compute the statistic from running moments of the window.
    ///
    /// Statistics that are a function of count, mean and sum of squared
    /// deviations override this so the rolling engine can update
    /// incrementally. The default returns `None`, which makes the engine
    /// fall back to [`Self::compute`].
    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        let _ = moments;
        None
    }
}

impl<S: WindowStatistic + ?Sized> WindowStatistic for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&self, window: &[f64]) -> f64 {
        (**self).compute(window)
    }

    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        (**self).from_moments(moments)
    }
}

impl<S: WindowStatistic + ?Sized> WindowStatistic for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&self, window: &[f64]) -> f64 {
        (**self).compute(window)
    }

    fn from_moments(&self, moments: &Moments) -> Option<f64> {
        (**self).from_moments(moments)
    }
}
