//! Fixed-width terminal output for the weekly report.
//!
//! Layout:
//!
//! ```text
//! Rates based on last 7 days
//! Confirmed                      Dead
//!  multi-  daily      days to     multi-  daily      days to
//!  plier   increase   double      plier   increase   double
//!    2.0x  10.0%      7.2           3.0x  17.2%      4.2
//! Week summary
//!                 Confirmed           Death       Recovered
//! date         total  today    total  today    total  today
//! 03/02/2020      110     10        2      0        0      0
//! ```
//!
//! Trailing whitespace is trimmed from every line.

use chrono::NaiveDate;

use crate::domain::{GrowthStats, TimeSeriesRow, WeekStats, latest_date};
use crate::error::ReportError;
use crate::report::{row_on, week_stats};
use crate::timeline::{Timeline, add_days};

/// Days shown in the day-by-day table, ending at the as-of date.
pub const SUMMARY_DAYS: i64 = 8;

/// Build the full report: growth table followed by the day-by-day summary.
///
/// `as_of = None` reports on the latest date in the table.
pub fn format_report(
    rows: &[TimeSeriesRow],
    as_of: Option<NaiveDate>,
    window_days: i64,
    timeline: &Timeline,
) -> Result<String, ReportError> {
    let as_of = match as_of {
        Some(d) => d,
        None => latest_date(rows).ok_or(ReportError::EmptySeries)?,
    };

    let stats = week_stats(rows, as_of, window_days, timeline)?;
    let mut out = format_week_stats(&stats);
    out.push_str(&format_day_table(rows, as_of)?);
    Ok(out)
}

/// Print [`format_report`] to stdout.
pub fn print_report(
    rows: &[TimeSeriesRow],
    as_of: Option<NaiveDate>,
    window_days: i64,
    timeline: &Timeline,
) -> Result<(), ReportError> {
    print!("{}", format_report(rows, as_of, window_days, timeline)?);
    Ok(())
}

/// The multiplier / daily increase / doubling time table.
pub fn format_week_stats(stats: &WeekStats) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("Rates based on last {} days", stats.window_days));
    push_line(&mut out, "Confirmed                      Dead");
    push_line(&mut out, &" multi-  daily      days to    ".repeat(2));
    push_line(&mut out, &" plier   increase   double     ".repeat(2));
    push_line(
        &mut out,
        &format!("{} {}", stats_cells(&stats.confirmed), stats_cells(&stats.deaths)),
    );
    out
}

fn stats_cells(s: &GrowthStats) -> String {
    format!(
        "  {:4.1}x  {:4.1}%     {:4.1}       ",
        s.multiplier, s.daily_increase_pct, s.doubling_time
    )
}

/// Cumulative totals and day-over-day changes for the [`SUMMARY_DAYS`] days
/// ending at `as_of`.
///
/// Each day needs its own row and the previous day's row; a gap anywhere in
/// that span is a [`ReportError::MissingDate`].
pub fn format_day_table(rows: &[TimeSeriesRow], as_of: NaiveDate) -> Result<String, ReportError> {
    let mut out = String::new();
    push_line(&mut out, "Week summary");
    push_line(&mut out, "                Confirmed           Death       Recovered");
    push_line(&mut out, "date         total  today    total  today    total  today");

    for back in (0..SUMMARY_DAYS).rev() {
        let date = add_days(as_of, -back);
        let today = row_on(rows, date)?;
        let previous = row_on(rows, add_days(date, -1))?;

        push_line(
            &mut out,
            &format!(
                "{:9} {:8} {:6} {:8} {:6} {:8} {:6}",
                date.format("%m/%d/%Y").to_string(),
                today.confirmed,
                delta(today.confirmed, previous.confirmed),
                today.deaths,
                delta(today.deaths, previous.deaths),
                today.recovered,
                delta(today.recovered, previous.recovered),
            ),
        );
    }
    Ok(out)
}

fn delta(today: u64, previous: u64) -> i64 {
    today as i64 - previous as i64
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn rows() -> Vec<TimeSeriesRow> {
        let confirmed = [90, 100, 110, 121, 133, 146, 161, 177, 195];
        confirmed
            .iter()
            .enumerate()
            .map(|(i, &c)| TimeSeriesRow::new(day(i as u32 + 1), c, c / 50, c / 10))
            .collect()
    }

    #[test]
    fn stats_line_layout() {
        let stats = WeekStats {
            window_days: 7,
            confirmed: GrowthStats {
                multiplier: 1.95,
                daily_increase_pct: 9.996,
                doubling_time: 7.2026,
            },
            deaths: GrowthStats {
                multiplier: 0.0,
                daily_increase_pct: 0.0,
                doubling_time: f64::INFINITY,
            },
        };
        let text = format_week_stats(&stats);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Rates based on last 7 days");
        assert_eq!(lines[2], " multi-  daily      days to     multi-  daily      days to");
        assert_eq!(lines[4], "   1.9x  10.0%      7.2           0.0x   0.0%      inf");
    }

    #[test]
    fn day_table_has_eight_rows_with_deltas() {
        let text = format_day_table(&rows(), day(9)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 + SUMMARY_DAYS as usize);
        assert_eq!(
            lines[3],
            "03/02/2020      100     10        2      1       10      1"
        );
        assert_eq!(
            lines[10],
            "03/09/2020      195     18        3      0       19      2"
        );
    }

    #[test]
    fn missing_previous_day_fails() {
        // 03/01 is the earliest row, so the table cannot start on 03/01.
        let err = format_day_table(&rows(), day(8)).unwrap_err();
        assert_eq!(err, ReportError::MissingDate(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()));
    }

    #[test]
    fn report_defaults_to_latest_date() {
        let text = format_report(&rows(), None, 7, &Timeline::default()).unwrap();
        assert!(text.starts_with("Rates based on last 7 days\n"));
        assert!(text.contains("Week summary\n"));
        assert!(text.trim_end().ends_with("03/09/2020      195     18        3      0       19      2"));
    }

    #[test]
    fn empty_table_is_reported() {
        let err = format_report(&[], None, 7, &Timeline::default()).unwrap_err();
        assert_eq!(err, ReportError::EmptySeries);
    }
}
