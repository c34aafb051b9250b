//! Command-line parsing for the `ctrend` binary.
//!
//! Argument parsing and dispatch stay out of the fitting/report code; the
//! library functions only ever see plain values.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ctrend", version, about = "Exponential growth summaries and charts for case-count series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print growth rates for the trailing window and the last eight days.
    Report(ReportArgs),
    /// Render the six-panel chart to an SVG file.
    Plot(PlotArgs),
}

/// Synthetic series shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// First day of the series (YYYY-MM-DD).
    #[arg(long, default_value = "2020-02-15")]
    pub start: NaiveDate,

    /// Number of daily rows to generate.
    #[arg(long, default_value_t = 45)]
    pub days: usize,

    /// Confirmed count on the first day.
    #[arg(long, default_value_t = 20.0)]
    pub initial: f64,

    /// Daily growth rate of confirmed cases (0.12 = 12% per day).
    #[arg(long, default_value_t = 0.12)]
    pub growth: f64,

    /// Deaths as a fraction of confirmed.
    #[arg(long, default_value_t = 0.03)]
    pub death_rate: f64,

    /// Recoveries as a fraction of confirmed `recovery-lag` days earlier.
    #[arg(long, default_value_t = 0.8)]
    pub recovery_rate: f64,

    /// Days between confirmation and recovery.
    #[arg(long, default_value_t = 14)]
    pub recovery_lag: usize,

    /// Standard deviation of the daily log-noise.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed for the generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Reference date for day offsets (YYYY-MM-DD).
    #[arg(long, default_value = "2020-02-01")]
    pub epoch: NaiveDate,
}

/// Options for `ctrend report`.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    /// Report date; defaults to the latest row.
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Trailing window (days) for growth estimates.
    #[arg(long, default_value_t = 7)]
    pub window: i64,

    /// Print the window statistics as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Options for `ctrend plot`.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    /// First chart date; defaults to 2020-01-20.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last chart date; defaults to three days after the latest row.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Legend label for the observed points.
    #[arg(long, default_value = "")]
    pub label: String,

    /// Scatter marker radius (pixels).
    #[arg(long, default_value_t = 3)]
    pub marker_size: u32,

    /// Output SVG path.
    #[arg(long, short = 'o', default_value = "trends.svg")]
    pub out: PathBuf,
}
