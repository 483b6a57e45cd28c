//! Sample covariance estimation.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::MathError;

/// Column means of a T x N matrix.
///
/// # Errors
/// Returns `MathError::EmptyData` if the matrix has no rows.
pub fn column_means(data: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    data.mean_axis(Axis(0)).ok_or(MathError::EmptyData)
}

fn is_constant(column: ArrayView1<'_, f64>) -> bool {
    column.iter().all(|&x| x == column[0])
}

/// Unbiased sample covariance of the columns of a T x N return matrix.
///
/// Centers every column on its mean and divides the pairwise cross-products
/// by `T - 1`. Only the upper triangle is computed and then mirrored, so the
/// result is exactly symmetric. A constant column is centered to exact zeros,
/// so its variance and every covariance it takes part in are exactly `0.0`.
///
/// # Arguments
/// * `returns` - Return matrix, one row per observation, one column per asset
///
/// # Returns
/// N x N covariance matrix.
///
/// # Errors
/// Returns `MathError::InsufficientData` when `T < 2` and
/// `MathError::NumericalInstability` if the input holds non-finite values.
pub fn sample_covariance(returns: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let (n_obs, n_assets) = returns.dim();
    if n_obs < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: n_obs });
    }
    if returns.iter().any(|x| !x.is_finite()) {
        return Err(MathError::NumericalInstability("returns contain NaN or Inf".to_string()));
    }

    let means = column_means(returns)?;
    let mut centered = returns - &means.insert_axis(Axis(0));
    for (i, mut column) in centered.axis_iter_mut(Axis(1)).enumerate() {
        if is_constant(returns.column(i)) {
            column.fill(0.0);
        }
    }
    let denom = (n_obs - 1) as f64;

    let mut cov = Array2::zeros((n_assets, n_assets));
    for i in 0..n_assets {
        let ci = centered.column(i);
        for j in i..n_assets {
            let value = ci.dot(&centered.column(j)) / denom;
            cov[[i, j]] = value;
            cov[[j, i]] = value;
        }
    }

    Ok(cov)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn covariance_two_assets() {
        let returns = array![[0.01, 0.00], [-0.02, 0.01], [0.03, -0.01], [0.00, 0.02]];
        let cov = sample_covariance(&returns).unwrap();

        assert_relative_eq!(cov[[0, 0]], 0.0013 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(cov[[1, 1]], 0.0005 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(cov[[0, 1]], -0.0002, epsilon = 1e-15);
        assert_eq!(cov[[0, 1]], cov[[1, 0]]);
    }

    #[test]
    fn covariance_is_symmetric() {
        let returns = array![
            [0.010, 0.020, -0.005],
            [0.003, -0.011, 0.007],
            [-0.020, 0.004, 0.012],
            [0.015, 0.009, -0.003],
            [0.001, -0.002, 0.000],
        ];
        let cov = sample_covariance(&returns).unwrap();

        for i in 0..3 {
            assert!(cov[[i, i]] >= 0.0);
            for j in 0..3 {
                assert_eq!(cov[[i, j]], cov[[j, i]]);
            }
        }
    }

    #[test]
    fn covariance_constant_column() {
        let returns = array![[0.5, 0.01], [0.5, -0.02], [0.5, 0.03]];
        let cov = sample_covariance(&returns).unwrap();

        assert_eq!(cov[[0, 0]], 0.0);
        assert_eq!(cov[[0, 1]], 0.0);
    }

    #[rstest]
    #[case(0.1, 3)]
    #[case(0.003, 10)]
    #[case(0.01, 25)]
    fn covariance_constant_column_with_inexact_mean(#[case] value: f64, #[case] n_obs: usize) {
        let returns = Array2::from_shape_fn((n_obs, 2), |(t, j)| {
            if j == 0 { 0.01 * (t % 3) as f64 - 0.01 } else { value }
        });
        let cov = sample_covariance(&returns).unwrap();

        assert_eq!(cov[[1, 1]], 0.0);
        assert_eq!(cov[[0, 1]], 0.0);
        assert_eq!(cov[[1, 0]], 0.0);
        assert!(cov[[0, 0]] > 0.0);
    }

    #[test]
    fn covariance_insufficient_data() {
        let returns = array![[0.01, 0.02]];
        assert_eq!(
            sample_covariance(&returns),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        );
    }

    #[test]
    fn covariance_rejects_nan() {
        let returns = array![[0.01], [f64::NAN]];
        assert!(matches!(sample_covariance(&returns), Err(MathError::NumericalInstability(_))));
    }

    #[test]
    fn column_means_empty() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert_eq!(column_means(&empty), Err(MathError::EmptyData));
    }
}
