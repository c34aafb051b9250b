//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - produced by any loader (or the synthetic generator)
//! - printed as JSON from the CLI
//! - compared directly in tests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cumulative counts for one region on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl TimeSeriesRow {
    pub fn new(date: NaiveDate, confirmed: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            date,
            confirmed,
            deaths,
            recovered,
        }
    }

    /// Value of the selected column.
    pub fn value(&self, series: Series) -> u64 {
        match series {
            Series::Confirmed => self.confirmed,
            Series::Deaths => self.deaths,
            Series::Recovered => self.recovered,
        }
    }
}

/// Sort a table by date (stable, so equal dates keep their input order).
pub fn sort_rows(rows: &mut [TimeSeriesRow]) {
    rows.sort_by_key(|r| r.date);
}

/// Latest date present in the table.
pub fn latest_date(rows: &[TimeSeriesRow]) -> Option<NaiveDate> {
    rows.iter().map(|r| r.date).max()
}

/// Which count column to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Confirmed,
    Deaths,
    Recovered,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Confirmed, Series::Deaths, Series::Recovered];

    /// Human-readable label for chart titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Series::Confirmed => "Confirmed",
            Series::Deaths => "Deaths",
            Series::Recovered => "Recovered",
        }
    }

    /// Whether the chart overlays an exponential fit on this series.
    ///
    /// Recovered counts lag infections and are not modelled as exponential.
    pub fn is_fitted(self) -> bool {
        !matches!(self, Series::Recovered)
    }
}

/// `y = exp(growth_rate * x + intercept)`, with `x` in days since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialModel {
    pub growth_rate: f64,
    pub intercept: f64,
}

impl ExponentialModel {
    /// The fallback used when a fit is impossible: `y = 1` everywhere.
    pub const FLAT: Self = Self {
        growth_rate: 0.0,
        intercept: 0.0,
    };

    pub fn evaluate(&self, x: f64) -> f64 {
        (self.growth_rate * x + self.intercept).exp()
    }

    /// Daily growth expressed as a percentage: `(e^rate - 1) * 100`.
    pub fn daily_increase_pct(&self) -> f64 {
        self.growth_rate.exp_m1() * 100.0
    }
}

/// Growth figures for one series over the report window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    /// `last / first` over the window, or 0 when the first value is 0.
    pub multiplier: f64,
    pub daily_increase_pct: f64,
    /// Rule-of-72 estimate; infinite or NaN when growth is zero.
    pub doubling_time: f64,
}

/// Trailing-window statistics for confirmed cases and deaths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekStats {
    pub window_days: i64,
    pub confirmed: GrowthStats,
    pub deaths: GrowthStats,
}

/// Inclusive date range drawn by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Marker and legend settings for one plotted trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStyle {
    /// Scatter marker radius in pixels.
    pub marker_size: u32,
    /// Legend label for the observed points.
    pub label: String,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            marker_size: 3,
            label: String::new(),
        }
    }
}
