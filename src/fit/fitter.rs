//! Log-linear regression for exponential growth.
//!
//! Given samples `(x_i, y_i)` with `y_i > 0` we solve the straight-line least
//! squares problem
//!
//! ```text
//! ln y_i ≈ growth_rate * x_i + intercept
//! ```
//!
//! which is the exponential model `y = exp(growth_rate * x + intercept)`.
//!
//! Failure policy: [`fit`] reports why a fit is impossible. Charts and reports
//! go through [`fit_or_flat`], which substitutes [`ExponentialModel::FLAT`]
//! so a sparse or all-zero series still renders and reports (as 0% growth).

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::ExponentialModel;
use crate::error::FitError;
use crate::math::{fit_line, lin_space};
use crate::timeline::Timeline;

/// Number of points sampled along a fitted curve.
pub const FIT_POINTS: usize = 30;

/// Fit an exponential model to strictly positive samples.
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<ExponentialModel, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(FitError::TooFewSamples(xs.len()));
    }

    let mut logs = Vec::with_capacity(ys.len());
    for (index, &value) in ys.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) || !xs[index].is_finite() {
            return Err(FitError::InvalidSample { index, value });
        }
        logs.push(value.ln());
    }

    let (x_min, x_max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if x_max <= x_min {
        return Err(FitError::Singular);
    }

    let line = fit_line(xs, &logs).ok_or(FitError::Solver)?;
    Ok(ExponentialModel {
        growth_rate: line.slope,
        intercept: line.intercept,
    })
}

/// [`fit`], falling back to the flat model when the fit is impossible.
pub fn fit_or_flat(xs: &[f64], ys: &[f64]) -> ExponentialModel {
    match fit(xs, ys) {
        Ok(model) => model,
        Err(err) => {
            debug!(samples = xs.len(), %err, "exponential fit failed; using flat model");
            ExponentialModel::FLAT
        }
    }
}

/// Keep only the pairs whose y is strictly positive.
pub fn positive_samples(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    xs.iter()
        .zip(ys)
        .filter(|(_, y)| **y > 0.0)
        .map(|(&x, &y)| (x, y))
        .unzip()
}

/// Fit the positive samples and evaluate the curve at [`FIT_POINTS`] evenly
/// spaced offsets over `[start, end]` (inclusive).
///
/// A missing `start`/`end` defaults to the smallest/largest x of the positive
/// samples (all samples if none are positive). With no samples at all and no
/// explicit bounds, the result is empty.
pub fn fit_range_offsets(
    xs: &[f64],
    ys: &[f64],
    start: Option<f64>,
    end: Option<f64>,
) -> (Vec<f64>, Vec<f64>) {
    let (x_used, y_used) = positive_samples(xs, ys);
    let model = fit_or_flat(&x_used, &y_used);

    let bounds_from: &[f64] = if x_used.is_empty() { xs } else { &x_used };
    let lo = start.or_else(|| bounds_from.iter().copied().reduce(f64::min));
    let hi = end.or_else(|| bounds_from.iter().copied().reduce(f64::max));
    let (Some(lo), Some(hi)) = (lo, hi) else {
        return (Vec::new(), Vec::new());
    };

    let grid = lin_space(lo, hi, FIT_POINTS);
    let values = grid.iter().map(|&x| model.evaluate(x)).collect();
    (grid, values)
}

/// Calendar-date variant of [`fit_range_offsets`].
///
/// Dates are converted to offsets with `timeline`, fitted, and the sampled x
/// values are converted back to timestamps.
pub fn fit_range_dates(
    timeline: &Timeline,
    dates: &[NaiveDateTime],
    ys: &[f64],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> (Vec<NaiveDateTime>, Vec<f64>) {
    let xs: Vec<f64> = dates.iter().map(|&d| timeline.to_offset(d)).collect();
    let (grid, values) = fit_range_offsets(
        &xs,
        ys,
        start.map(|d| timeline.to_offset(d)),
        end.map(|d| timeline.to_offset(d)),
    );
    let dates = grid.into_iter().map(|x| timeline.to_date(x)).collect();
    (dates, values)
}
