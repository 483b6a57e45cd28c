//! Moment functions over slices and a sliding accumulator.

use riskdecomp_primitives::Moments;

use crate::MathError;

fn require(data: &[f64], required: usize) -> Result<(), MathError> {
    if data.len() < required {
        return Err(MathError::InsufficientData { required, actual: data.len() });
    }
    Ok(())
}

fn is_constant(data: &[f64]) -> bool {
    data.iter().all(|&x| x == data[0])
}

/// Arithmetic mean.
///
/// The mean of a constant slice is its value, without summation rounding.
///
/// # Errors
/// Returns `MathError::EmptyData` for an empty slice.
pub fn mean(data: &[f64]) -> Result<f64, MathError> {
    if data.is_empty() {
        return Err(MathError::EmptyData);
    }
    if is_constant(data) {
        return Ok(data[0]);
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Two-pass moments of a slice.
///
/// A constant slice has `m2` of exactly `0.0`.
///
/// # Errors
/// Returns `MathError::EmptyData` for an empty slice.
pub fn moments(data: &[f64]) -> Result<Moments, MathError> {
    let m = mean(data)?;
    let m2 = data.iter().map(|x| (x - m).powi(2)).sum();
    Ok(Moments::new(data.len(), m, m2))
}

/// Unbiased sample variance (divides by `n - 1`).
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two observations.
pub fn sample_variance(data: &[f64]) -> Result<f64, MathError> {
    require(data, 2)?;
    let m = moments(data)?;
    Ok(m.m2 / (m.count - 1) as f64)
}

/// Sample standard deviation.
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two observations.
pub fn sample_std(data: &[f64]) -> Result<f64, MathError> {
    sample_variance(data).map(f64::sqrt)
}

/// Moment coefficient of skewness, `m3 / m2^(3/2)` with population moments.
///
/// A window with zero dispersion has no asymmetry and yields `0.0`.
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two observations.
pub fn skewness(data: &[f64]) -> Result<f64, MathError> {
    require(data, 2)?;
    if is_constant(data) {
        return Ok(0.0);
    }
    let n = data.len() as f64;
    let m = mean(data)?;
    let (m2, m3) = data.iter().fold((0.0, 0.0), |(s2, s3), x| {
        let d = x - m;
        (s2 + d * d, s3 + d * d * d)
    });
    let m2 = m2 / n;
    let m3 = m3 / n;
    if m2 <= 0.0 {
        return Ok(0.0);
    }
    Ok(m3 / m2.powf(1.5))
}

/// Welford accumulator supporting both insertion and removal.
///
/// Used to slide a fixed-size window along a series in O(1) per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl SlidingMoments {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0, mean: 0.0, m2: 0.0 }
    }

    /// Seed an accumulator from a slice.
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.push(x);
        }
        acc
    }

    /// Accumulator holding `count` copies of `value`, with exact zero dispersion.
    #[must_use]
    pub const fn constant(value: f64, count: usize) -> Self {
        if count == 0 {
            return Self::new();
        }
        Self { count, mean: value, m2: 0.0 }
    }

    /// Add an observation.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Remove an observation previously added.
    pub fn pop(&mut self, x: f64) {
        match self.count {
            0 => {}
            1 => *self = Self::new(),
            _ => {
                self.count -= 1;
                let delta = x - self.mean;
                self.mean -= delta / self.count as f64;
                self.m2 -= delta * (x - self.mean);
                if self.m2 < 0.0 {
                    self.m2 = 0.0;
                }
            }
        }
    }

    /// Replace `old` with `new` in one step.
    pub fn slide(&mut self, old: f64, new: f64) {
        self.push(new);
        self.pop(old);
    }

    /// Current moments.
    #[must_use]
    pub const fn moments(&self) -> Moments {
        Moments::new(self.count, self.mean, self.m2)
    }

    /// Number of observations held.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn mean_and_variance() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&data).unwrap(), 3.0);
        assert_relative_eq!(sample_variance(&data).unwrap(), 2.5);
        assert_relative_eq!(sample_std(&data).unwrap(), 2.5_f64.sqrt());
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0.01])]
    fn variance_needs_two_observations(#[case] data: &[f64]) {
        assert!(matches!(sample_variance(data), Err(MathError::InsufficientData { .. })));
    }

    #[test]
    fn mean_empty() {
        assert_eq!(mean(&[]), Err(MathError::EmptyData));
    }

    #[test]
    fn skewness_symmetric_is_zero() {
        assert_relative_eq!(skewness(&[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn skewness_right_tail_is_positive() {
        // mean 1, deviations -1,-1,-1,3: m2 = 3, m3 = 6
        let skew = skewness(&[0.0, 0.0, 0.0, 4.0]).unwrap();
        assert_relative_eq!(skew, 6.0 / 3.0_f64.powf(1.5), epsilon = 1e-12);
    }

    #[test]
    fn skewness_constant_window() {
        assert_eq!(skewness(&[0.25, 0.25, 0.25]).unwrap(), 0.0);
        assert_eq!(skewness(&[0.1, 0.1, 0.1]).unwrap(), 0.0);
    }

    #[rstest]
    #[case(0.1, 3)]
    #[case(0.003, 10)]
    #[case(0.01, 25)]
    fn constant_window_has_exact_zero_dispersion(#[case] value: f64, #[case] n: usize) {
        let data = vec![value; n];
        assert_eq!(mean(&data).unwrap(), value);
        assert_eq!(moments(&data).unwrap().m2, 0.0);
        assert_eq!(sample_variance(&data).unwrap(), 0.0);
        assert_eq!(sample_std(&data).unwrap(), 0.0);
    }

    #[test]
    fn sliding_matches_two_pass() {
        let data = [0.012, -0.004, 0.021, -0.017, 0.003, 0.008, -0.011, 0.015];
        let window = 3;
        let mut acc = SlidingMoments::from_slice(&data[..window]);

        for end in window..data.len() {
            acc.slide(data[end - window], data[end]);
            let expected = moments(&data[end + 1 - window..=end]).unwrap();
            let actual = acc.moments();
            assert_eq!(actual.count, window);
            assert_relative_eq!(actual.mean, expected.mean, epsilon = 1e-15);
            assert_relative_eq!(actual.m2, expected.m2, epsilon = 1e-15);
        }
    }

    #[test]
    fn sliding_constant_is_exact() {
        let acc = SlidingMoments::constant(0.1, 3);
        assert_eq!(acc.moments(), Moments::new(3, 0.1, 0.0));
        assert_eq!(SlidingMoments::constant(0.1, 0).count(), 0);
    }

    #[test]
    fn sliding_pop_to_empty() {
        let mut acc = SlidingMoments::from_slice(&[1.0]);
        acc.pop(1.0);
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.moments(), Moments::default());
    }
}
