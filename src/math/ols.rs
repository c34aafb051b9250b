//! Degree-1 least squares.
//!
//! We fit `y ≈ slope * x + intercept` by building the two-column design matrix
//! `[x, 1]` and solving with nalgebra's SVD. The problem is tiny (a week or a
//! few months of daily samples), so SVD cost is irrelevant and it behaves well
//! when the columns are nearly collinear.

use nalgebra::{DMatrix, DVector};

/// Coefficients of a fitted straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

/// Solve the ordinary least squares line through `(xs[i], ys[i])`.
///
/// Returns `None` when the inputs differ in length, hold fewer than two
/// samples, or the solve produces non-finite coefficients.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<Line> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len();
    let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { xs[r] } else { 1.0 });
    let target = DVector::from_column_slice(ys);

    let svd = design.svd(true, true);
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(&target, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(Line {
                    slope: beta[0],
                    intercept: beta[1],
                });
            }
        }
    }

    None
}
