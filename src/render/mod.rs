//! Six-panel case-count chart.
//!
//! Layout (3 rows x 2 columns):
//!
//! ```text
//! Confirmed   | Confirmed (log)
//! Deaths      | Deaths (log)
//! Recovered   | Recovered (log)
//! ```
//!
//! Confirmed and deaths carry an exponential fit overlay; recovered does not.
//! All panels share the x range `[start, end]` of the chart window and exactly
//! five evenly spaced date ticks.
//!
//! The data prep ([`layout`]) is separate from drawing ([`render`]) so the
//! panel contents can be checked without a backend.

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;
use tracing::info;

use crate::domain::{DateWindow, Series, TimeSeriesRow, TraceStyle, latest_date};
use crate::error::RenderError;
use crate::fit::fit_range_offsets;
use crate::math::lin_space;
use crate::timeline::{Timeline, add_days};

mod axis;
mod panel;

pub use axis::DayAxis;

/// Number of date ticks on every x axis.
pub const X_TICKS: usize = 5;

/// SVG canvas size used by [`render_svg`].
pub const SVG_SIZE: (u32, u32) = (1400, 1400);

/// What one panel shows, in day-offset coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub series: Series,
    pub log_scale: bool,
    /// Observed `(offset, count)` pairs; non-positive counts are dropped on log panels.
    pub points: Vec<(f64, f64)>,
    /// Sampled exponential fit, for fitted series only.
    pub curve: Option<Vec<(f64, f64)>>,
}

impl Panel {
    pub fn title(&self) -> String {
        let base = format!("{} by date", self.series.display_name());
        if self.log_scale {
            format!("{base}  -- log scale")
        } else {
            base
        }
    }
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub x_range: (f64, f64),
    pub ticks: Vec<f64>,
    /// Row-major: `[confirmed, confirmed log, deaths, deaths log, recovered, recovered log]`.
    pub panels: Vec<Panel>,
}

/// Default chart window: 2020-01-20 through three days past the latest row.
pub fn default_window(rows: &[TimeSeriesRow]) -> Option<DateWindow> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 20)?;
    let end = add_days(latest_date(rows)?, 3);
    Some(DateWindow::new(start, end))
}

/// Filter `rows` to `window`, fit confirmed and deaths, and lay out the panels.
pub fn layout(
    rows: &[TimeSeriesRow],
    window: DateWindow,
    timeline: &Timeline,
) -> Result<ChartLayout, RenderError> {
    if window.end <= window.start {
        return Err(RenderError::InvalidWindow {
            start: window.start,
            end: window.end,
        });
    }

    let mut in_window: Vec<&TimeSeriesRow> = rows.iter().filter(|r| window.contains(r.date)).collect();
    if in_window.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    in_window.sort_by_key(|r| r.date);

    let x0 = timeline.date_offset(window.start);
    let x1 = timeline.date_offset(window.end);
    let xs: Vec<f64> = in_window.iter().map(|r| timeline.date_offset(r.date)).collect();

    let mut panels = Vec::with_capacity(Series::ALL.len() * 2);
    for series in Series::ALL {
        let ys: Vec<f64> = in_window.iter().map(|r| r.value(series) as f64).collect();
        let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();

        let curve = series.is_fitted().then(|| {
            let (cx, cy) = fit_range_offsets(&xs, &ys, Some(x0), Some(x1));
            cx.into_iter().zip(cy).collect::<Vec<_>>()
        });

        panels.push(Panel {
            series,
            log_scale: false,
            points: points.clone(),
            curve: curve.clone(),
        });
        panels.push(Panel {
            series,
            log_scale: true,
            points: points.into_iter().filter(|&(_, y)| y > 0.0).collect(),
            curve,
        });
    }

    Ok(ChartLayout {
        x_range: (x0, x1),
        ticks: lin_space(x0, x1, X_TICKS),
        panels,
    })
}

/// Draw the six-panel chart for `rows` onto `area`.
pub fn render<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    rows: &[TimeSeriesRow],
    window: DateWindow,
    style: &TraceStyle,
    timeline: &Timeline,
) -> Result<(), RenderError> {
    let chart = layout(rows, window, timeline)?;
    let cells = area.split_evenly((3, 2));
    for (cell, spec) in cells.iter().zip(&chart.panels) {
        panel::draw_panel(cell, spec, &chart, style, timeline)?;
    }
    Ok(())
}

/// Render the chart into an SVG file at `path`.
pub fn render_svg(
    path: &Path,
    rows: &[TimeSeriesRow],
    window: DateWindow,
    style: &TraceStyle,
    timeline: &Timeline,
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    render(&root, rows, window, style, timeline)?;
    root.present()?;
    info!(path = %path.display(), start = %window.start, end = %window.end, "chart written");
    Ok(())
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    fn rows() -> Vec<TimeSeriesRow> {
        (0..10)
            .map(|i| TimeSeriesRow::new(add_days(day(3, 1), i), 100 * (i as u64 + 1), i as u64, 0))
            .collect()
    }

    #[test]
    fn six_panels_fit_only_confirmed_and_deaths() {
        let chart = layout(&rows(), DateWindow::new(day(3, 1), day(3, 20)), &Timeline::default()).unwrap();
        assert_eq!(chart.panels.len(), 6);

        let fitted: Vec<(Series, bool)> = chart
            .panels
            .iter()
            .map(|p| (p.series, p.curve.is_some()))
            .collect();
        assert_eq!(
            fitted,
            vec![
                (Series::Confirmed, true),
                (Series::Confirmed, true),
                (Series::Deaths, true),
                (Series::Deaths, true),
                (Series::Recovered, false),
                (Series::Recovered, false),
            ]
        );
        assert_eq!(chart.panels[1].title(), "Confirmed by date  -- log scale");
        assert_eq!(chart.panels[4].title(), "Recovered by date");
    }

    #[test]
    fn ticks_span_window_evenly() {
        let tl = Timeline::default();
        let chart = layout(&rows(), DateWindow::new(day(3, 1), day(3, 21)), &tl).unwrap();
        assert_eq!(chart.ticks.len(), X_TICKS);
        assert_eq!(chart.ticks[0], tl.date_offset(day(3, 1)));
        assert_eq!(chart.ticks[4], tl.date_offset(day(3, 21)));
        assert_eq!(chart.ticks[2], tl.date_offset(day(3, 11)));
    }

    #[test]
    fn log_panels_drop_zero_counts() {
        let chart = layout(&rows(), DateWindow::new(day(3, 1), day(3, 20)), &Timeline::default()).unwrap();
        let deaths = &chart.panels[2];
        let deaths_log = &chart.panels[3];
        assert_eq!(deaths.points.len(), 10);
        assert_eq!(deaths_log.points.len(), 9);
        assert!(chart.panels[5].points.is_empty());
    }

    #[test]
    fn rows_outside_window_are_ignored() {
        let chart = layout(&rows(), DateWindow::new(day(3, 3), day(3, 5)), &Timeline::default()).unwrap();
        assert_eq!(chart.panels[0].points.len(), 3);
        assert_eq!(chart.panels[0].curve.as_ref().map(Vec::len), Some(crate::fit::FIT_POINTS));
    }

    #[test]
    fn rejects_bad_windows() {
        let tl = Timeline::default();
        assert!(matches!(
            layout(&rows(), DateWindow::new(day(3, 5), day(3, 5)), &tl),
            Err(RenderError::InvalidWindow { .. })
        ));
        assert!(matches!(
            layout(&rows(), DateWindow::new(day(5, 1), day(5, 9)), &tl),
            Err(RenderError::EmptySeries)
        ));
    }

    #[test]
    fn default_window_extends_past_latest_row() {
        let w = default_window(&rows()).unwrap();
        assert_eq!(w.start, day(1, 20));
        assert_eq!(w.end, day(3, 13));
        assert!(default_window(&[]).is_none());
    }
}
