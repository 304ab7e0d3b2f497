//! Dense matrix kernel - shape-checked arithmetic and LU factorization
//!
//! The global system solves go through [`LuFactors`] rather than an opaque
//! library routine so that a vanishing pivot is reported with the offending
//! equation index instead of silently dividing by near-zero.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// Add two matrices, failing on a shape mismatch instead of panicking.
pub fn checked_add(a: &Mat, b: &Mat) -> SolverResult<Mat> {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return Err(mismatch("add", a, b));
    }
    Ok(a + b)
}

/// Subtract two matrices, failing on a shape mismatch instead of panicking.
pub fn checked_sub(a: &Mat, b: &Mat) -> SolverResult<Mat> {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return Err(mismatch("subtract", a, b));
    }
    Ok(a - b)
}

/// Multiply two matrices, failing unless `a.ncols() == b.nrows()`.
pub fn checked_mul(a: &Mat, b: &Mat) -> SolverResult<Mat> {
    if a.ncols() != b.nrows() {
        return Err(mismatch("multiply", a, b));
    }
    Ok(a * b)
}

/// Multiply a matrix by a vector, failing unless `a.ncols() == b.len()`.
pub fn checked_mul_vec(a: &Mat, b: &Vec) -> SolverResult<Vec> {
    if a.ncols() != b.len() {
        return Err(SolverError::DimensionMismatch {
            op: "multiply",
            left_rows: a.nrows(),
            left_cols: a.ncols(),
            right_rows: b.len(),
            right_cols: 1,
        });
    }
    Ok(a * b)
}

/// Frobenius norm of a matrix.
pub fn frobenius_norm(a: &Mat) -> f64 {
    a.norm()
}

fn mismatch(op: &'static str, a: &Mat, b: &Mat) -> SolverError {
    SolverError::DimensionMismatch {
        op,
        left_rows: a.nrows(),
        left_cols: a.ncols(),
        right_rows: b.nrows(),
        right_cols: b.ncols(),
    }
}

/// LU factorization with partial pivoting: P·A = L·U
///
/// `l` is unit lower triangular, `u` upper triangular, `perm[i]` is the
/// original row now sitting in position `i`, and `sign` tracks row swaps
/// for the determinant.
#[derive(Debug, Clone)]
pub struct LuFactors {
    l: Mat,
    u: Mat,
    perm: std::vec::Vec<usize>,
    sign: f64,
}

impl LuFactors {
    /// Factor a square matrix.
    ///
    /// At each elimination step the row with the maximal absolute pivot in
    /// the current column is selected; rows of U, the permutation, and the
    /// already-computed part of L are swapped together. A pivot below a
    /// threshold scaled by the matrix magnitude fails with
    /// [`SolverError::SingularMatrix`] carrying the column index.
    pub fn decompose(a: &Mat) -> SolverResult<Self> {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(mismatch("lu_decompose", a, a));
        }

        let scale = a.amax();
        if scale == 0.0 {
            return Err(SolverError::SingularMatrix { dof: 0 });
        }
        let threshold = f64::EPSILON * scale * (n as f64);

        let mut u = a.clone();
        let mut l = Mat::identity(n, n);
        let mut perm: std::vec::Vec<usize> = (0..n).collect();
        let mut sign = 1.0;

        for k in 0..n {
            // Partial pivoting: largest magnitude in column k at or below row k
            let mut pivot_row = k;
            let mut pivot_mag = u[(k, k)].abs();
            for r in (k + 1)..n {
                let mag = u[(r, k)].abs();
                if mag > pivot_mag {
                    pivot_mag = mag;
                    pivot_row = r;
                }
            }

            if pivot_mag < threshold {
                return Err(SolverError::SingularMatrix { dof: k });
            }

            if pivot_row != k {
                u.swap_rows(k, pivot_row);
                perm.swap(k, pivot_row);
                sign = -sign;
                for c in 0..k {
                    let tmp = l[(k, c)];
                    l[(k, c)] = l[(pivot_row, c)];
                    l[(pivot_row, c)] = tmp;
                }
            }

            let pivot = u[(k, k)];
            for r in (k + 1)..n {
                let factor = u[(r, k)] / pivot;
                l[(r, k)] = factor;
                u[(r, k)] = 0.0;
                for c in (k + 1)..n {
                    u[(r, c)] -= factor * u[(k, c)];
                }
            }
        }

        Ok(Self { l, u, perm, sign })
    }

    /// Solve A·x = b: forward substitution of L·y = P·b, then back
    /// substitution of U·x = y.
    pub fn solve(&self, b: &Vec) -> SolverResult<Vec> {
        let n = self.l.nrows();
        if b.len() != n {
            return Err(SolverError::DimensionMismatch {
                op: "lu_solve",
                left_rows: n,
                left_cols: n,
                right_rows: b.len(),
                right_cols: 1,
            });
        }

        // Forward: L·y = P·b (unit diagonal)
        let mut y = Vec::zeros(n);
        for i in 0..n {
            let mut sum = b[self.perm[i]];
            for j in 0..i {
                sum -= self.l[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        // Backward: U·x = y
        let mut x = Vec::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.u[(i, j)] * x[j];
            }
            x[i] = sum / self.u[(i, i)];
        }

        Ok(x)
    }

    /// Determinant from the factorization: sign times the product of U's diagonal.
    pub fn determinant(&self) -> f64 {
        let mut det = self.sign;
        for i in 0..self.u.nrows() {
            det *= self.u[(i, i)];
        }
        det
    }

    /// Unit lower triangular factor.
    pub fn l(&self) -> &Mat {
        &self.l
    }

    /// Upper triangular factor.
    pub fn u(&self) -> &Mat {
        &self.u
    }

    /// Row permutation: `perm[i]` is the source row of permuted row `i`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }
}

/// Factor and solve A·x = b in one call.
pub fn solve(a: &Mat, b: &Vec) -> SolverResult<Vec> {
    LuFactors::decompose(a)?.solve(b)
}

/// Determinant of a square matrix: closed forms for 1x1 and 2x2, LU otherwise.
pub fn determinant(a: &Mat) -> SolverResult<f64> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(mismatch("determinant", a, a));
    }
    match n {
        0 => Ok(1.0),
        1 => Ok(a[(0, 0)]),
        2 => Ok(a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]),
        _ => match LuFactors::decompose(a) {
            Ok(lu) => Ok(lu.determinant()),
            Err(SolverError::SingularMatrix { .. }) => Ok(0.0),
            Err(e) => Err(e),
        },
    }
}

/// Invert a square matrix by solving against each unit basis vector.
pub fn inverse(a: &Mat) -> SolverResult<Mat> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(mismatch("inverse", a, a));
    }
    let lu = LuFactors::decompose(a)?;
    let mut inv = Mat::zeros(n, n);
    let mut e = Vec::zeros(n);
    for col in 0..n {
        e[col] = 1.0;
        let x = lu.solve(&e)?;
        inv.set_column(col, &x);
        e[col] = 0.0;
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_matrix() -> Mat {
        Mat::from_row_slice(
            4,
            4,
            &[
                4.0, 1.0, 2.0, 0.5, //
                1.0, 5.0, 0.0, 1.0, //
                2.0, 0.0, 6.0, 2.0, //
                0.5, 1.0, 2.0, 3.0,
            ],
        )
    }

    #[test]
    fn test_lu_round_trip() {
        let a = sample_matrix();
        let b = Vec::from_vec(vec![1.0, -2.0, 3.0, 0.5]);

        let x = solve(&a, &b).unwrap();
        let b_back = &a * &x;

        for i in 0..4 {
            assert_relative_eq!(b_back[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_factors_reconstruct() {
        let a = sample_matrix();
        let lu = LuFactors::decompose(&a).unwrap();

        // P·A = L·U
        let mut pa = Mat::zeros(4, 4);
        for (i, &src) in lu.permutation().iter().enumerate() {
            for j in 0..4 {
                pa[(i, j)] = a[(src, j)];
            }
        }
        let reconstructed = lu.l() * lu.u();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(reconstructed[(i, j)], pa[(i, j)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_identity() {
        let a = sample_matrix();
        let inv = inverse(&a).unwrap();
        let ident = &a * &inv;

        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(ident[(i, j)], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_determinant_closed_forms() {
        let a1 = Mat::from_row_slice(1, 1, &[3.5]);
        assert_relative_eq!(determinant(&a1).unwrap(), 3.5);

        let a2 = Mat::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(determinant(&a2).unwrap(), -2.0);

        // 3x3 via LU, compare against the rule of Sarrus
        let a3 = Mat::from_row_slice(3, 3, &[2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
        assert_relative_eq!(determinant(&a3).unwrap(), 6.0, epsilon = 1e-12);

        // A rank-deficient matrix reports a zero determinant
        let a_singular =
            Mat::from_row_slice(3, 3, &[2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 1.0]);
        assert_relative_eq!(determinant(&a_singular).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_frobenius_norm() {
        let a = Mat::identity(4, 4);
        assert_relative_eq!(frobenius_norm(&a), 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_singular_matrix_detected() {
        // Second row is a multiple of the first
        let a = Mat::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0]);
        let b = Vec::from_vec(vec![1.0, 2.0, 3.0]);

        match solve(&a, &b) {
            Err(SolverError::SingularMatrix { .. }) => {}
            other => panic!("expected SingularMatrix, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Mat::zeros(2, 3);
        let b = Mat::zeros(2, 3);

        assert!(checked_add(&a, &b).is_ok());
        assert!(matches!(
            checked_mul(&a, &b),
            Err(SolverError::DimensionMismatch { .. })
        ));

        let c = Mat::zeros(4, 4);
        assert!(matches!(
            checked_add(&a, &c),
            Err(SolverError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        // Needs a row swap on the first step
        let a = Mat::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let b = Vec::from_vec(vec![2.0, 3.0]);

        let x = solve(&a, &b).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-14);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-14);
    }
}
