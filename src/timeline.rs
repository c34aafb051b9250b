//! Calendar dates <-> fractional day offsets.
//!
//! Regression needs numeric x values, so every date is expressed as the number
//! of days since a fixed epoch. The epoch is configuration, not a global: a
//! [`Timeline`] carries it and all conversions go through that value.

use chrono::{Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Epoch used when none is configured (2020-02-01 00:00).
pub fn default_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 2, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts between timestamps and day offsets from a fixed epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    epoch: NaiveDateTime,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(default_epoch())
    }
}

impl Timeline {
    pub fn new(epoch: NaiveDateTime) -> Self {
        Self { epoch }
    }

    /// Epoch anchored at midnight of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(midnight(date))
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// Days elapsed since the epoch, with millisecond precision.
    pub fn to_offset(&self, at: NaiveDateTime) -> f64 {
        (at - self.epoch).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Offset of midnight on `date`.
    pub fn date_offset(&self, date: NaiveDate) -> f64 {
        self.to_offset(midnight(date))
    }

    /// Inverse of [`Timeline::to_offset`].
    ///
    /// Offsets beyond chrono's representable range saturate to its bounds.
    pub fn to_date(&self, offset: f64) -> NaiveDateTime {
        let millis = (offset * MILLIS_PER_DAY).round() as i64;
        let shifted = Duration::try_milliseconds(millis).and_then(|d| self.epoch.checked_add_signed(d));
        match shifted {
            Some(at) => at,
            None if millis < 0 => NaiveDateTime::MIN,
            None => NaiveDateTime::MAX,
        }
    }
}

/// Midnight at the start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// `date` shifted by a whole number of days, saturating at chrono's bounds.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    match Duration::try_days(days).and_then(|d| date.checked_add_signed(d)) {
        Some(d) => d,
        None if days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}
