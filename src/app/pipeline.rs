//! Shared pipeline used by the `report` and `plot` subcommands.
//!
//! series -> (window statistics + text report) or (chart)
//!
//! The CLI layer only turns arguments into an [`AnalysisConfig`] and prints.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

use crate::data::{SampleConfig, generate_series};
use crate::domain::{DateWindow, TimeSeriesRow, TraceStyle, WeekStats, latest_date, sort_rows};
use crate::error::{AppError, ReportError};
use crate::render::{default_window, render_svg};
use crate::report::{MAX_WINDOW_DAYS, format_report, week_stats};
use crate::timeline::Timeline;

/// A run's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub sample: SampleConfig,
    pub timeline: Timeline,

    pub as_of: Option<NaiveDate>,
    pub window_days: i64,

    pub chart_from: Option<NaiveDate>,
    pub chart_to: Option<NaiveDate>,
    pub style: TraceStyle,
    pub out: PathBuf,
}

/// Outputs of a report run.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub as_of: NaiveDate,
    pub stats: WeekStats,
    pub text: String,
}

/// Build the input table, sorted by date.
pub fn load_rows(config: &AnalysisConfig) -> Result<Vec<TimeSeriesRow>, AppError> {
    let mut rows = generate_series(&config.sample)?;
    sort_rows(&mut rows);
    info!(
        rows = rows.len(),
        first = %config.sample.start,
        seed = config.sample.seed,
        "generated synthetic series"
    );
    Ok(rows)
}

/// Compute window statistics and the formatted report.
pub fn run_report(config: &AnalysisConfig) -> Result<ReportOutput, AppError> {
    if config.window_days < 0 {
        return Err(AppError::new(2, "Window must be >= 0 days."));
    }
    if config.window_days > MAX_WINDOW_DAYS {
        return Err(AppError::new(
            2,
            format!("Window must be <= {MAX_WINDOW_DAYS} days."),
        ));
    }
    let rows = load_rows(config)?;
    let as_of = match config.as_of {
        Some(d) => d,
        None => latest_date(&rows).ok_or(ReportError::EmptySeries)?,
    };

    let stats = week_stats(&rows, as_of, config.window_days, &config.timeline)?;
    let text = format_report(&rows, Some(as_of), config.window_days, &config.timeline)?;
    Ok(ReportOutput { as_of, stats, text })
}

/// Render the chart to `config.out` and return the window that was drawn.
pub fn run_plot(config: &AnalysisConfig) -> Result<DateWindow, AppError> {
    let rows = load_rows(config)?;
    let defaults = default_window(&rows).ok_or(ReportError::EmptySeries)?;
    let window = DateWindow::new(
        config.chart_from.unwrap_or(defaults.start),
        config.chart_to.unwrap_or(defaults.end),
    );

    render_svg(&config.out, &rows, window, &config.style, &config.timeline)?;
    Ok(window)
}
