//! Synthetic outbreak generation.
//!
//! Confirmed cases follow `initial * (1 + growth)^t` with multiplicative
//! log-normal noise. Deaths are a fixed fraction of confirmed, and recoveries a
//! fraction of the confirmed count `recovery_lag` days earlier. All three are
//! cumulative, so each is forced to be non-decreasing.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::TimeSeriesRow;
use crate::error::AppError;
use crate::timeline::add_days;

/// Parameters of a synthetic series.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: usize,
    /// Confirmed count on the first day.
    pub initial_confirmed: f64,
    /// Daily growth rate (0.1 = 10% per day).
    pub daily_growth: f64,
    pub death_rate: f64,
    pub recovery_rate: f64,
    pub recovery_lag: usize,
    /// Standard deviation of the daily log-noise (0 for an exact curve).
    pub noise: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 2, 15).unwrap_or_default(),
            days: 45,
            initial_confirmed: 20.0,
            daily_growth: 0.12,
            death_rate: 0.03,
            recovery_rate: 0.8,
            recovery_lag: 14,
            noise: 0.05,
            seed: 42,
        }
    }
}

/// Generate `config.days` consecutive daily rows starting at `config.start`.
pub fn generate_series(config: &SampleConfig) -> Result<Vec<TimeSeriesRow>, AppError> {
    if config.days == 0 {
        return Err(AppError::new(2, "Sample length must be > 0 days."));
    }
    if !(config.initial_confirmed.is_finite() && config.initial_confirmed >= 0.0) {
        return Err(AppError::new(2, "Initial confirmed count must be finite and >= 0."));
    }
    if !(config.daily_growth.is_finite() && config.daily_growth > -1.0) {
        return Err(AppError::new(2, "Daily growth must be finite and > -100%."));
    }
    for (name, rate) in [("Death", config.death_rate), ("Recovery", config.recovery_rate)] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(AppError::new(2, format!("{name} rate must be within [0, 1].")));
        }
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(2, format!("Invalid noise level {}: {e}", config.noise)))?;
    // Keeps the noisy series centred on the expected curve.
    let mean_correction = 0.5 * config.noise * config.noise;

    let mut rows: Vec<TimeSeriesRow> = Vec::with_capacity(config.days);
    for t in 0..config.days {
        let expected = config.initial_confirmed * (1.0 + config.daily_growth).powi(t as i32);
        let shock = (normal.sample(&mut rng) - mean_correction).exp();
        let observed = to_count(expected * shock);

        let prev = rows.last().copied();
        let confirmed = observed.max(prev.map_or(0, |r| r.confirmed));
        let deaths = to_count(confirmed as f64 * config.death_rate).max(prev.map_or(0, |r| r.deaths));
        let lagged_confirmed = match t.checked_sub(config.recovery_lag) {
            Some(i) if i < rows.len() => Some(rows[i].confirmed),
            Some(_) => Some(confirmed),
            None => None,
        };
        let recovered = lagged_confirmed
            .map_or(0, |c| to_count(c as f64 * config.recovery_rate))
            .max(prev.map_or(0, |r| r.recovered));

        rows.push(TimeSeriesRow::new(
            add_days(config.start, t as i64),
            confirmed,
            deaths,
            recovered,
        ));
    }

    Ok(rows)
}

fn to_count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_series_is_exact_exponential() {
        let config = SampleConfig {
            days: 8,
            initial_confirmed: 100.0,
            daily_growth: 0.1,
            noise: 0.0,
            ..SampleConfig::default()
        };
        let rows = generate_series(&config).unwrap();
        let confirmed: Vec<u64> = rows.iter().map(|r| r.confirmed).collect();
        assert_eq!(confirmed, vec![100, 110, 121, 133, 146, 161, 177, 195]);
        assert_eq!(rows[0].date, config.start);
        assert_eq!(rows[7].date, add_days(config.start, 7));
    }

    #[test]
    fn counts_are_cumulative() {
        let config = SampleConfig {
            noise: 0.3,
            ..SampleConfig::default()
        };
        let rows = generate_series(&config).unwrap();
        assert_eq!(rows.len(), config.days);
        for w in rows.windows(2) {
            assert!(w[1].confirmed >= w[0].confirmed);
            assert!(w[1].deaths >= w[0].deaths);
            assert!(w[1].recovered >= w[0].recovered);
            assert_eq!(w[1].date, add_days(w[0].date, 1));
        }
        assert!(rows[..config.recovery_lag].iter().all(|r| r.recovered == 0));
    }

    #[test]
    fn same_seed_same_series() {
        let config = SampleConfig::default();
        assert_eq!(generate_series(&config).unwrap(), generate_series(&config).unwrap());
        let other = SampleConfig { seed: 7, ..config.clone() };
        assert_ne!(generate_series(&config).unwrap(), generate_series(&other).unwrap());
    }

    #[test]
    fn rejects_invalid_settings() {
        let zero_days = SampleConfig { days: 0, ..SampleConfig::default() };
        assert_eq!(generate_series(&zero_days).unwrap_err().exit_code(), 2);
        let bad_rate = SampleConfig { death_rate: 1.5, ..SampleConfig::default() };
        assert!(generate_series(&bad_rate).is_err());
        let bad_noise = SampleConfig { noise: -1.0, ..SampleConfig::default() };
        assert!(generate_series(&bad_noise).is_err());
    }
}
