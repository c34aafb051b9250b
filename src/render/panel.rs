//! Drawing a single chart panel with Plotters.

use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;

use crate::domain::TraceStyle;
use crate::error::RenderError;
use crate::render::axis::DayAxis;
use crate::render::{ChartLayout, Panel};
use crate::timeline::Timeline;

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
const CURVE_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Fraction of the value span added above and below a linear y axis.
const LINEAR_PAD: f64 = 0.05;
/// Factor applied below/above the extremes of a log y axis.
const LOG_PAD: f64 = 1.25;

pub(super) fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    chart: &ChartLayout,
    style: &TraceStyle,
    timeline: &Timeline,
) -> Result<(), RenderError> {
    if panel.log_scale {
        let (lo, hi) = log_bounds(panel);
        draw_on(area, panel, chart, (lo..hi).log_scale(), style, timeline)
    } else {
        let (lo, hi) = linear_bounds(panel);
        draw_on(area, panel, chart, lo..hi, style, timeline)
    }
}

fn draw_on<DB, Y>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    chart: &ChartLayout,
    y_spec: Y,
    style: &TraceStyle,
    timeline: &Timeline,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let (x0, x1) = chart.x_range;
    let x_spec = DayAxis::new(x0, x1, chart.ticks.clone(), *timeline);

    let mut ctx = ChartBuilder::on(area)
        .caption(panel.title(), ("sans-serif", 16))
        .margin(8)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 30)
        .build_cartesian_2d(x_spec.clone(), y_spec)?;

    let fmt_date = |v: &f64| x_spec.label(*v);
    let fmt_count = |v: &f64| format!("{v:.0}");
    ctx.configure_mesh()
        .x_labels(chart.ticks.len())
        .x_label_formatter(&fmt_date)
        .y_label_formatter(&fmt_count)
        .light_line_style(WHITE)
        .draw()?;

    let marker = style.marker_size;
    let observed = ctx.draw_series(
        panel
            .points
            .iter()
            .map(|&p| Circle::new(p, marker, POINT_COLOR.filled())),
    )?;
    if !style.label.is_empty() {
        observed
            .label(style.label.as_str())
            .legend(|(x, y)| Circle::new((x, y), 4, POINT_COLOR.filled()));
    }

    if let Some(curve) = &panel.curve {
        let visible = curve
            .iter()
            .copied()
            .filter(|&(_, y)| y.is_finite() && (!panel.log_scale || y > 0.0));
        ctx.draw_series(LineSeries::new(visible, CURVE_COLOR.stroke_width(2)))?
            .label("curve fit")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn values(panel: &Panel) -> impl Iterator<Item = f64> + '_ {
    let curve = panel.curve.iter().flatten().map(|&(_, y)| y);
    panel
        .points
        .iter()
        .map(|&(_, y)| y)
        .chain(curve)
        .filter(|y| y.is_finite())
}

fn linear_bounds(panel: &Panel) -> (f64, f64) {
    let (lo, hi) = values(panel).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo).abs() * LINEAR_PAD).max(0.5);
    (lo - pad, hi + pad)
}

fn log_bounds(panel: &Panel) -> (f64, f64) {
    let (lo, hi) = values(panel)
        .filter(|&y| y > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !(lo.is_finite() && hi.is_finite()) {
        return (1.0, 10.0);
    }
    (lo / LOG_PAD, hi * LOG_PAD)
}
