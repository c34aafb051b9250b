//! Exponential curve fitting.
//!
//! Responsibilities:
//!
//! - fit `y = exp(a*x + b)` by regressing `ln y` on `x`
//! - decide what happens when a fit is impossible (`fit_or_flat`)
//! - sample a fitted curve over a range, in offset or calendar-date terms

pub mod fitter;

pub use fitter::*;
