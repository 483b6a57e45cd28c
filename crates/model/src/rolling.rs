//! Rolling window statistics over a single return series.

use riskdecomp_math::SlidingMoments;
use riskdecomp_primitives::{AssetReturnSeries, RollingPoint, RollingStatResult};
use riskdecomp_stats::StdDev;
use riskdecomp_traits::WindowStatistic;

use crate::ModelError;

/// How windows are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollingMode {
    /// Evaluate the statistic over each window from scratch.
    #[default]
    Recompute,
    /// Slide running moments one observation at a time and evaluate
    /// moments-based statistics from them. Statistics without a moments
    /// form are recomputed per window.
    Incremental,
}

/// Configuration for the rolling window engine.
#[derive(Debug, Clone)]
pub struct RollingConfig {
    /// Window length in observations; at least 2.
    pub window: usize,
    /// Evaluation mode.
    pub mode: RollingMode,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { window: 20, mode: RollingMode::Recompute }
    }
}

/// Evaluates a windowed statistic at every right-aligned window position.
///
/// The window ending at index `i` covers observations `i + 1 - k ..= i` and
/// its value is stamped with the date at `i`. A series of length `T` yields
/// `max(T - k + 1, 0)` values.
#[derive(Debug, Clone)]
pub struct RollingWindowEngine {
    config: RollingConfig,
}

impl RollingWindowEngine {
    /// Create an engine with the given window length in recompute mode.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self::with_config(RollingConfig { window, ..Default::default() })
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub const fn with_config(config: RollingConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RollingConfig {
        &self.config
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }

    /// Evaluate `statistic` over every complete window of `series`.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidWindow` if the window is shorter than 2.
    /// A series shorter than the window is not an error and yields an empty
    /// result.
    pub fn compute<S>(
        &self,
        series: &AssetReturnSeries,
        statistic: &S,
    ) -> Result<RollingStatResult, ModelError>
    where
        S: WindowStatistic + ?Sized,
    {
        let values = self.compute_values(series.returns(), statistic)?;
        let k = self.config.window;

        let points = series
            .dates()
            .iter()
            .skip(k.saturating_sub(1))
            .zip(values)
            .map(|(&date, value)| RollingPoint { date, value })
            .collect::<Vec<_>>();

        tracing::debug!(
            asset = %series.asset(),
            statistic = statistic.name(),
            window = k,
            n_points = points.len(),
            "computed rolling statistic"
        );

        Ok(RollingStatResult {
            asset: series.asset().clone(),
            statistic: statistic.name().to_string(),
            window: k,
            points,
        })
    }

    /// Rolling sample standard deviation, the default rolling statistic.
    ///
    /// # Errors
    /// Same as [`Self::compute`].
    pub fn rolling_std(&self, series: &AssetReturnSeries) -> Result<RollingStatResult, ModelError> {
        self.compute(series, &StdDev::new())
    }

    /// Evaluate `statistic` over every complete window of a raw slice.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidWindow` if the window is shorter than 2.
    pub fn compute_values<S>(&self, data: &[f64], statistic: &S) -> Result<Vec<f64>, ModelError>
    where
        S: WindowStatistic + ?Sized,
    {
        let k = self.config.window;
        if k < 2 {
            return Err(ModelError::InvalidWindow(k));
        }
        if data.len() < k {
            return Ok(Vec::new());
        }

        let values = match self.config.mode {
            RollingMode::Recompute => recompute(data, k, statistic),
            RollingMode::Incremental => incremental(data, k, statistic),
        };

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NumericalInstability(format!(
                "{} is not finite for the window ending at index {}",
                statistic.name(),
                pos + k - 1
            )));
        }

        Ok(values)
    }
}

impl Default for RollingWindowEngine {
    fn default() -> Self {
        Self::with_config(RollingConfig::default())
    }
}

fn recompute<S: WindowStatistic + ?Sized>(data: &[f64], k: usize, statistic: &S) -> Vec<f64> {
    data.windows(k).map(|w| statistic.compute(w)).collect()
}

fn incremental<S: WindowStatistic + ?Sized>(data: &[f64], k: usize, statistic: &S) -> Vec<f64> {
    let mut acc = SlidingMoments::from_slice(&data[..k]);
    let Some(first) = statistic.from_moments(&acc.moments()) else {
        tracing::trace!(
            statistic = statistic.name(),
            "statistic has no moments form, recomputing each window"
        );
        return recompute(data, k, statistic);
    };

    let mut values = Vec::with_capacity(data.len() + 1 - k);
    values.push(first);

    // Length of the run of equal values ending at the current index
    let mut run = data[..k].iter().rev().take_while(|&&x| x == data[k - 1]).count();

    for end in k..data.len() {
        run = if data[end] == data[end - 1] { run + 1 } else { 1 };
        if run >= k {
            acc = SlidingMoments::constant(data[end], k);
        } else {
            acc.slide(data[end - k], data[end]);
        }
        let start = end + 1 - k;
        let value = statistic
            .from_moments(&acc.moments())
            .unwrap_or_else(|| statistic.compute(&data[start..=end]));
        values.push(value);
    }

    values
}
