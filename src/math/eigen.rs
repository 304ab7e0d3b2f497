//! Generalized symmetric eigensolver for modal analysis
//!
//! Solves K·φ = λ·M·φ by reducing to a standard symmetric problem through a
//! Cholesky factorization of the mass matrix: with M = L·Lᵀ, the reduced
//! matrix L⁻¹·K·L⁻ᵀ shares eigenvalues with the pencil and its eigenvectors
//! back-transform as φ = L⁻ᵀ·y.

use nalgebra::linalg::SymmetricEigen;

use super::dense::{Mat, Vec};
use crate::error::{SolverError, SolverResult};

/// One eigenpair of the pencil (K, M).
#[derive(Debug, Clone)]
pub struct EigenPair {
    /// Eigenvalue λ (rad²/s² for a structural pencil), clamped to >= 0
    pub lambda: f64,
    /// Mass-normalized eigenvector (φᵀ·M·φ = 1)
    pub shape: Vec,
}

/// Solve K·φ = λ·M·φ for the `num_modes` lowest modes.
///
/// Both matrices must be square, symmetric, and of equal size; M must be
/// positive definite (a consistent mass matrix on the free DOFs is).
pub fn generalized_symmetric(k: &Mat, m: &Mat, num_modes: usize) -> SolverResult<std::vec::Vec<EigenPair>> {
    let n = k.nrows();
    if k.ncols() != n || m.nrows() != n || m.ncols() != n {
        return Err(SolverError::DimensionMismatch {
            op: "generalized_eigen",
            left_rows: k.nrows(),
            left_cols: k.ncols(),
            right_rows: m.nrows(),
            right_cols: m.ncols(),
        });
    }
    if n == 0 {
        return Ok(std::vec::Vec::new());
    }

    let chol = m.clone().cholesky().ok_or(SolverError::IllConditionedMass)?;
    let l = chol.l();

    // A = L⁻¹·K·L⁻ᵀ, built as L⁻¹·(L⁻¹·K)ᵀ
    let x = l
        .solve_lower_triangular(k)
        .ok_or(SolverError::IllConditionedMass)?;
    let a = l
        .solve_lower_triangular(&x.transpose())
        .ok_or(SolverError::IllConditionedMass)?;

    // Symmetrize against roundoff before the symmetric QR iteration
    let a_sym = (&a + a.transpose()) * 0.5;
    let eig = SymmetricEigen::new(a_sym);

    let mut order: std::vec::Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        eig.eigenvalues[i]
            .partial_cmp(&eig.eigenvalues[j])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let l_t = l.transpose();
    let mut pairs = std::vec::Vec::with_capacity(num_modes.min(n));
    for &idx in order.iter().take(num_modes) {
        let y = eig.eigenvectors.column(idx).into_owned();
        let mut shape = l_t
            .solve_upper_triangular(&y)
            .ok_or(SolverError::IllConditionedMass)?;

        // Mass-normalize: φᵀ·M·φ = 1
        let mphi = m * &shape;
        let gen_mass = shape.dot(&mphi);
        if gen_mass > 0.0 {
            shape /= gen_mass.sqrt();
        }

        pairs.push(EigenPair {
            lambda: eig.eigenvalues[idx].max(0.0),
            shape,
        });
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sdof_oscillator() {
        // k = 4π², m = 1  =>  ω = 2π, f = 1 Hz
        let k = Mat::from_row_slice(1, 1, &[4.0 * std::f64::consts::PI.powi(2)]);
        let m = Mat::from_row_slice(1, 1, &[1.0]);

        let pairs = generalized_symmetric(&k, &m, 1).unwrap();
        assert_eq!(pairs.len(), 1);

        let freq = pairs[0].lambda.sqrt() / (2.0 * std::f64::consts::PI);
        assert_relative_eq!(freq, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_two_dof_known_modes() {
        // Two equal masses, springs k-k-k between walls:
        // eigenvalues are k/m and 3k/m
        let k_val = 100.0;
        let k = Mat::from_row_slice(2, 2, &[2.0 * k_val, -k_val, -k_val, 2.0 * k_val]);
        let m = Mat::identity(2, 2) * 2.0;

        let pairs = generalized_symmetric(&k, &m, 2).unwrap();
        assert_relative_eq!(pairs[0].lambda, k_val / 2.0, epsilon = 1e-8);
        assert_relative_eq!(pairs[1].lambda, 3.0 * k_val / 2.0, epsilon = 1e-8);

        // Mass normalization
        for pair in &pairs {
            let gen_mass = pair.shape.dot(&(&m * &pair.shape));
            assert_relative_eq!(gen_mass, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_indefinite_mass_rejected() {
        let k = Mat::identity(2, 2);
        let m = Mat::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);

        assert!(matches!(
            generalized_symmetric(&k, &m, 2),
            Err(SolverError::IllConditionedMass)
        ));
    }
}
