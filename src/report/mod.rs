//! Weekly growth statistics and the terminal summary.
//!
//! The statistics live here; `format` turns them into fixed-width text so the
//! numbers stay testable on their own.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{ExponentialModel, GrowthStats, Series, TimeSeriesRow, WeekStats};
use crate::error::ReportError;
use crate::fit::{fit_or_flat, positive_samples};
use crate::timeline::{Timeline, add_days};

pub mod format;

pub use format::*;

/// Trailing window used when the caller does not pick one.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Largest trailing window accepted from the command line.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Rule-of-72 numerator for the doubling-time estimate.
const RULE_OF_72: f64 = 72.0;

/// Growth statistics for confirmed cases and deaths over the `window_days`
/// days ending at `as_of` (both ends inclusive).
///
/// Rows dated after `as_of` are dropped so a back-dated report ignores later data.
pub fn week_stats(
    rows: &[TimeSeriesRow],
    as_of: NaiveDate,
    window_days: i64,
    timeline: &Timeline,
) -> Result<WeekStats, ReportError> {
    let from = add_days(as_of, -window_days);
    let mut window: Vec<&TimeSeriesRow> = rows
        .iter()
        .filter(|r| r.date >= from && r.date <= as_of)
        .collect();
    if window.is_empty() {
        return Err(ReportError::EmptyWindow { from, to: as_of });
    }
    window.sort_by_key(|r| r.date);
    debug!(%from, to = %as_of, rows = window.len(), "selected report window");

    let xs: Vec<f64> = window.iter().map(|r| timeline.date_offset(r.date)).collect();
    Ok(WeekStats {
        window_days,
        confirmed: growth_stats(&window, &xs, Series::Confirmed),
        deaths: growth_stats(&window, &xs, Series::Deaths),
    })
}

fn growth_stats(window: &[&TimeSeriesRow], xs: &[f64], series: Series) -> GrowthStats {
    let ys: Vec<f64> = window.iter().map(|r| r.value(series) as f64).collect();

    let first = ys.first().copied().unwrap_or(0.0);
    let last = ys.last().copied().unwrap_or(0.0);
    let multiplier = if first > 0.0 { last / first } else { 0.0 };

    let (x_used, y_used) = positive_samples(xs, &ys);
    let model: ExponentialModel = fit_or_flat(&x_used, &y_used);
    let daily_increase_pct = model.daily_increase_pct();

    GrowthStats {
        multiplier,
        daily_increase_pct,
        // Zero growth divides by zero here; inf/NaN is passed through as-is.
        doubling_time: RULE_OF_72 / daily_increase_pct,
    }
}

/// The row recorded for `date` (the first one, should the table repeat it).
pub fn row_on(rows: &[TimeSeriesRow], date: NaiveDate) -> Result<&TimeSeriesRow, ReportError> {
    rows.iter()
        .find(|r| r.date == date)
        .ok_or(ReportError::MissingDate(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn ten_percent_rows() -> Vec<TimeSeriesRow> {
        let confirmed = [100, 110, 121, 133, 146, 161, 177, 195];
        let deaths = [2, 2, 3, 3, 4, 4, 5, 6];
        confirmed
            .iter()
            .zip(deaths)
            .enumerate()
            .map(|(i, (&c, d))| TimeSeriesRow::new(day(i as u32 + 1), c, d, 0))
            .collect()
    }

    #[test]
    fn ten_percent_daily_growth() {
        let stats = week_stats(&ten_percent_rows(), day(8), 7, &Timeline::default()).unwrap();
        assert_eq!(stats.window_days, 7);
        assert!((stats.confirmed.multiplier - 1.95).abs() < 1e-12);
        assert!(
            (stats.confirmed.daily_increase_pct - 10.0).abs() < 0.2,
            "pct={}",
            stats.confirmed.daily_increase_pct
        );
        assert!(
            (stats.confirmed.doubling_time - 7.2).abs() < 0.15,
            "doubling={}",
            stats.confirmed.doubling_time
        );
        assert!((stats.deaths.multiplier - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_first_value_gives_zero_multiplier() {
        let mut rows = ten_percent_rows();
        rows[0].confirmed = 0;
        rows[0].deaths = 0;
        let stats = week_stats(&rows, day(8), 7, &Timeline::default()).unwrap();
        assert_eq!(stats.confirmed.multiplier, 0.0);
        assert_eq!(stats.deaths.multiplier, 0.0);
        // The remaining positive days still carry the growth estimate.
        assert!(stats.confirmed.daily_increase_pct > 8.0);
    }

    #[test]
    fn flat_series_has_unbounded_doubling_time() {
        let rows: Vec<_> = (1..=8).map(|d| TimeSeriesRow::new(day(d), 50, 0, 0)).collect();
        let stats = week_stats(&rows, day(8), 7, &Timeline::default()).unwrap();
        assert_eq!(stats.confirmed.multiplier, 1.0);
        assert!(stats.confirmed.daily_increase_pct.abs() < 1e-9);
        assert!(stats.confirmed.doubling_time.abs() > 1e6);
        // Deaths never leave zero: flat model, 0% growth, 72 / 0 = inf.
        assert_eq!(stats.deaths.daily_increase_pct, 0.0);
        assert!(stats.deaths.doubling_time.is_infinite());
    }

    #[test]
    fn window_excludes_rows_after_as_of() {
        let rows = ten_percent_rows();
        let stats = week_stats(&rows, day(5), 3, &Timeline::default()).unwrap();
        // Days 2..=5: 110 -> 146.
        assert!((stats.confirmed.multiplier - 146.0 / 110.0).abs() < 1e-12);
    }

    #[test]
    fn empty_window_is_an_error() {
        let err = week_stats(&ten_percent_rows(), day(30), 7, &Timeline::default()).unwrap_err();
        assert_eq!(err, ReportError::EmptyWindow { from: day(23), to: day(30) });
    }

    #[test]
    fn oversized_window_covers_whole_table() {
        let stats = week_stats(&ten_percent_rows(), day(8), i64::MAX, &Timeline::default()).unwrap();
        assert_eq!(stats.window_days, i64::MAX);
        assert!((stats.confirmed.multiplier - 1.95).abs() < 1e-12);
    }

    #[test]
    fn lookup_of_absent_date_fails() {
        let rows = ten_percent_rows();
        assert_eq!(row_on(&rows, day(3)).unwrap().confirmed, 121);
        assert_eq!(row_on(&rows, day(20)), Err(ReportError::MissingDate(day(20))));
    }
}
