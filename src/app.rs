//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - builds the synthetic series
//! - prints the report or writes the chart

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, PlotArgs, ReportArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::TraceStyle;
use crate::error::AppError;
use crate::timeline::Timeline;

pub mod pipeline;

pub use pipeline::AnalysisConfig;

/// Entry point for the `ctrend` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Log to stderr so stdout carries only the report; `RUST_LOG` overrides `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let json = args.json;
    let config = report_config_from_args(&args);
    let output = pipeline::run_report(&config)?;

    if json {
        let body = serde_json::to_string_pretty(&output.stats)
            .map_err(|e| AppError::new(4, format!("Failed to encode stats as JSON: {e}")))?;
        println!("{body}");
    } else {
        print!("{}", output.text);
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = plot_config_from_args(&args);
    let window = pipeline::run_plot(&config)?;
    info!(
        out = %config.out.display(),
        from = %window.start,
        to = %window.end,
        "plot complete"
    );
    Ok(())
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        start: args.start,
        days: args.days,
        initial_confirmed: args.initial,
        daily_growth: args.growth,
        death_rate: args.death_rate,
        recovery_rate: args.recovery_rate,
        recovery_lag: args.recovery_lag,
        noise: args.noise,
        seed: args.seed,
    }
}

pub fn report_config_from_args(args: &ReportArgs) -> AnalysisConfig {
    AnalysisConfig {
        sample: sample_config_from_args(&args.sample),
        timeline: Timeline::from_date(args.sample.epoch),
        as_of: args.as_of,
        window_days: args.window,
        chart_from: None,
        chart_to: None,
        style: TraceStyle::default(),
        out: Default::default(),
    }
}

pub fn plot_config_from_args(args: &PlotArgs) -> AnalysisConfig {
    AnalysisConfig {
        sample: sample_config_from_args(&args.sample),
        timeline: Timeline::from_date(args.sample.epoch),
        as_of: None,
        window_days: crate::report::DEFAULT_WINDOW_DAYS,
        chart_from: args.from,
        chart_to: args.to,
        style: TraceStyle {
            marker_size: args.marker_size,
            label: args.label.clone(),
        },
        out: args.out.clone(),
    }
}

/// Rewrite argv so `ctrend` defaults to `ctrend report`.
///
/// Rules:
/// - `ctrend`                       -> `ctrend report`
/// - `ctrend --days 30 ...`         -> `ctrend report --days 30 ...`
/// - `ctrend --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if matches!(arg1.as_str(), "report" | "plot") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
    }
    argv
}
