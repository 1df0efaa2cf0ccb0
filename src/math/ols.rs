//! Ordinary least squares solver.
//!
//! The search solves many small regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We use SVD, which handles tall design matrices directly.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The numerical rank counts singular values above `σ_max · RANK_RTOL`.
//!   A rank below the column count means the columns are collinear (or there
//!   are fewer rows than columns) and the problem has no unique solution; we
//!   report that instead of returning a minimum-norm answer.

use nalgebra::{DMatrix, DVector};

/// Relative singular value cutoff for the rank test.
const RANK_RTOL: f64 = 1e-10;

/// The design matrix does not have full column rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankDeficient {
    pub rank: usize,
    pub columns: usize,
}

/// Solve a least squares problem using SVD.
///
/// Fails with [`RankDeficient`] when `x` does not have full column rank or the
/// solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, RankDeficient> {
    let p = x.ncols();
    let svd = x.clone().svd(true, true);

    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let tol = sigma_max * RANK_RTOL;
    let rank = svd.rank(tol);
    let deficient = RankDeficient { rank, columns: p };

    if rank < p {
        return Err(deficient);
    }

    let beta = svd.solve(y, tol).map_err(|_| deficient)?;
    if beta.iter().all(|v| v.is_finite()) {
        Ok(beta)
    } else {
        Err(deficient)
    }
}
