//! Error types.
//!
//! Library operations return one `thiserror` enum per concern. The binary folds
//! them into [`AppError`], which carries the process exit code:
//!
//! - `2`: invalid arguments or configuration
//! - `3`: data problems (missing dates, empty windows)
//! - `4`: rendering or output failures

use chrono::NaiveDate;
use thiserror::Error;

/// Why an exponential fit could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("x and y lengths differ ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("need at least 2 samples to fit, got {0}")]
    TooFewSamples(usize),
    #[error("sample {index} has non-positive or non-finite y={value}")]
    InvalidSample { index: usize, value: f64 },
    #[error("all x values are equal; slope is undetermined")]
    Singular,
    #[error("least squares solve failed")]
    Solver,
}

/// Failures while building the weekly report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("no row for {0}")]
    MissingDate(NaiveDate),
    #[error("no rows between {from} and {to}")]
    EmptyWindow { from: NaiveDate, to: NaiveDate },
    #[error("time series is empty")]
    EmptySeries,
}

/// Failures while drawing the chart.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid chart window: {start} .. {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("time series is empty")]
    EmptySeries,
    #[error("drawing failed: {0}")]
    Backend(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::new(3, format!("Report failed: {err}"))
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        let code = match err {
            RenderError::InvalidWindow { .. } => 2,
            RenderError::EmptySeries => 3,
            RenderError::Backend(_) => 4,
        };
        Self::new(code, format!("Chart failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_exit_codes() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        assert_eq!(AppError::from(ReportError::MissingDate(date)).exit_code(), 3);
        assert_eq!(AppError::from(RenderError::Backend("io".into())).exit_code(), 4);
        let err = AppError::from(RenderError::InvalidWindow { start: date, end: date });
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("2020-03-01"));
    }
}
