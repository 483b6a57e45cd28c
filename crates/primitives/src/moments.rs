//! Summary moments of a window of observations.

/// Count, mean and centered sum of squares of a set of observations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sum of squared deviations from the mean.
    pub m2: f64,
}

impl Moments {
    /// Create moments from their components.
    #[must_use]
    pub const fn new(count: usize, mean: f64, m2: f64) -> Self {
        Self { count, mean, m2 }
    }

    /// Unbiased sample variance (divides by `count - 1`).
    ///
    /// Returns `None` with fewer than two observations.
    #[must_use]
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2.max(0.0) / (self.count - 1) as f64)
    }

    /// Sample standard deviation.
    #[must_use]
    pub fn sample_std(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn moments_variance() {
        // 1, 2, 3: mean 2, m2 = 2
        let m = Moments::new(3, 2.0, 2.0);
        assert_relative_eq!(m.sample_variance().unwrap(), 1.0);
        assert_relative_eq!(m.sample_std().unwrap(), 1.0);
    }

    #[test]
    fn moments_single_observation() {
        assert!(Moments::new(1, 5.0, 0.0).sample_variance().is_none());
        assert!(Moments::default().sample_std().is_none());
    }

    #[test]
    fn moments_clamp_negative_m2() {
        let m = Moments::new(4, 0.0, -1e-18);
        assert_eq!(m.sample_variance(), Some(0.0));
    }
}
