//! Date axis over day offsets.
//!
//! Plotters picks "nice" tick values for plain `f64` ranges; the chart needs
//! ticks at exact, evenly spaced dates, so the x axis is its own coordinate
//! type that reports a fixed tick list and labels values as calendar dates.

use std::ops::Range;

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};

use crate::timeline::Timeline;

/// Label format for x ticks.
pub const TICK_FORMAT: &str = "%m/%d";

#[derive(Debug, Clone)]
pub struct DayAxis {
    start: f64,
    end: f64,
    ticks: Vec<f64>,
    timeline: Timeline,
}

impl DayAxis {
    pub fn new(start: f64, end: f64, ticks: Vec<f64>, timeline: Timeline) -> Self {
        Self {
            start,
            end,
            ticks,
            timeline,
        }
    }

    pub fn label(&self, offset: f64) -> String {
        self.timeline.to_date(offset).format(TICK_FORMAT).to_string()
    }
}

impl Ranged for DayAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.end - self.start;
        let pixels = limit.1 - limit.0;
        if pixels == 0 || span == 0.0 {
            return limit.1;
        }
        let frac = (value - self.start) / span;
        limit.0 + (pixels as f64 * frac + 1e-3).floor() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() < self.ticks.len() {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.start..self.end
    }
}

impl ValueFormatter<f64> for DayAxis {
    fn format(value: &f64) -> String {
        format!("{value:.1}")
    }

    fn format_ext(&self, value: &f64) -> String {
        self.label(*value)
    }
}
