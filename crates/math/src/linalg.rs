//! Linear algebra operations for portfolio risk.

use ndarray::{Array1, Array2};

use crate::MathError;

fn check_dimensions(weights: &Array1<f64>, matrix: &Array2<f64>) -> Result<(), MathError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(MathError::NotSquare { rows, cols });
    }
    if weights.len() != rows {
        return Err(MathError::DimensionMismatch { expected: rows, actual: weights.len() });
    }
    Ok(())
}

/// Row vector `w' S` for a weight vector and a square matrix.
///
/// # Arguments
/// * `weights` - Weight vector (n,)
/// * `matrix` - Square matrix (n x n)
///
/// # Errors
/// Returns error if the matrix is not square or the lengths differ.
pub fn weighted_row(weights: &Array1<f64>, matrix: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    check_dimensions(weights, matrix)?;
    Ok(weights.dot(matrix))
}

/// Quadratic form `w' S w`.
///
/// The value is returned as computed; for a near-singular positive
/// semidefinite matrix it can come out marginally below zero.
///
/// # Errors
/// Returns error if the matrix is not square or the lengths differ.
pub fn quadratic_form(weights: &Array1<f64>, matrix: &Array2<f64>) -> Result<f64, MathError> {
    let row = weighted_row(weights, matrix)?;
    Ok(row.dot(weights))
}

/// Check whether a square matrix is symmetric within a relative tolerance.
#[must_use]
pub fn is_symmetric(matrix: &Array2<f64>, tolerance: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }
    for i in 0..rows {
        for j in (i + 1)..cols {
            let a = matrix[[i, j]];
            let b = matrix[[j, i]];
            if (a - b).abs() > tolerance * a.abs().max(b.abs()).max(1.0) {
                return false;
            }
        }
    }
    true
}
