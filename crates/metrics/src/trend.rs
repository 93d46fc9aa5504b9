// crates/metrics/src/trend.rs
//! Trend classification: is the recent rate of gain accelerating,
//! decelerating, or stable relative to an earlier period?
//!
//! The comparison looks at a 60-day window ending today, split at its
//! midpoint index. Each half's rate is the same endpoint-difference-over-
//! count formula the recent average uses, scoped to that half.

use chrono::NaiveDate;
use levellog_types::{Snapshot, TrendDirection};

use crate::window::trailing_window;

/// Lookback window for the trend comparison.
pub const LOOKBACK_DAYS: u32 = 60;

/// Minimum data points inside the lookback window before a signal is
/// produced. Below this, noise dominates and the trend reads neutral.
pub const MIN_POINTS: usize = 16;

/// Dead band in percent: rate changes within ±10% classify as stable.
pub const BAND_PERCENT: f64 = 10.0;

/// First-half and second-half rates of a window split at its midpoint
/// index. `None` below [`MIN_POINTS`].
pub fn split_rates(window: &[Snapshot]) -> Option<(f64, f64)> {
    let n = window.len();
    if n < MIN_POINTS {
        return None;
    }
    let mid = n / 2;
    let first = (window[mid].xp - window[0].xp) as f64 / mid as f64;
    let second = (window[n - 1].xp - window[mid].xp) as f64 / (n - mid) as f64;
    Some((first, second))
}

/// Percent change of the second-half rate against the first-half rate.
///
/// A zero first-half rate has no meaningful percentage — returns `None`
/// rather than Infinity/NaN.
pub fn delta_percent(rate_first: f64, rate_second: f64) -> Option<f64> {
    if rate_first == 0.0 {
        return None;
    }
    Some((rate_second - rate_first) / rate_first * 100.0)
}

/// Classify a delta percentage against the ±[`BAND_PERCENT`] dead band.
pub fn classify(delta: Option<f64>) -> TrendDirection {
    match delta {
        Some(d) if d > BAND_PERCENT => TrendDirection::Up,
        Some(d) if d < -BAND_PERCENT => TrendDirection::Down,
        _ => TrendDirection::Neutral,
    }
}

/// Full trend evaluation over a sorted history.
pub fn evaluate(snapshots: &[Snapshot], today: NaiveDate) -> (TrendDirection, Option<f64>) {
    let window = trailing_window(snapshots, today, LOOKBACK_DAYS);
    let delta = split_rates(window).and_then(|(first, second)| delta_percent(first, second));
    (classify(delta), delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Consecutive daily snapshots ending at `end`, oldest first, with the
    /// given cumulative xp values.
    fn series(end: NaiveDate, xps: &[i64]) -> Vec<Snapshot> {
        xps.iter()
            .enumerate()
            .map(|(i, &xp)| Snapshot {
                date: end - chrono::Duration::days((xps.len() - 1 - i) as i64),
                level: 100,
                xp,
            })
            .collect()
    }

    #[test]
    fn test_delta_percent_upward() {
        // 100 → 115 is +15%, outside the +10% band.
        let delta = delta_percent(100.0, 115.0).unwrap();
        assert!((delta - 15.0).abs() < 1e-9);
        assert_eq!(classify(Some(delta)), TrendDirection::Up);
    }

    #[test]
    fn test_delta_percent_stable() {
        // 100 → 95 is -5%, inside the band.
        let delta = delta_percent(100.0, 95.0).unwrap();
        assert!((delta + 5.0).abs() < 1e-9);
        assert_eq!(classify(Some(delta)), TrendDirection::Neutral);
    }

    #[test]
    fn test_delta_percent_downward() {
        let delta = delta_percent(100.0, 80.0).unwrap();
        assert_eq!(classify(Some(delta)), TrendDirection::Down);
    }

    #[test]
    fn test_zero_first_half_rate_is_no_data() {
        assert_eq!(delta_percent(0.0, 500.0), None);
        assert_eq!(classify(None), TrendDirection::Neutral);
    }

    #[test]
    fn test_too_few_points_is_neutral() {
        let today = d(2024, 6, 30);
        let logs = series(today, &[0, 100, 200, 300, 400]);
        let (dir, delta) = evaluate(&logs, today);
        assert_eq!(dir, TrendDirection::Neutral);
        assert_eq!(delta, None);
    }

    #[test]
    fn test_sixteen_points_produces_signal() {
        let today = d(2024, 6, 30);
        // 16 points, constant 100/day: both halves rate 100 → 0% → neutral,
        // but with a concrete delta rather than no-data.
        let xps: Vec<i64> = (0..16).map(|i| i * 100).collect();
        let logs = series(today, &xps);
        let (dir, delta) = evaluate(&logs, today);
        assert_eq!(dir, TrendDirection::Neutral);
        assert_eq!(delta, Some(0.0));
    }

    #[test]
    fn test_accelerating_series_reads_up() {
        let today = d(2024, 6, 30);
        // First 10 days gain 100/day, last 10 days gain 300/day.
        let mut xps = Vec::new();
        let mut xp = 0i64;
        for i in 0..20 {
            xps.push(xp);
            xp += if i < 10 { 100 } else { 300 };
        }
        let logs = series(today, &xps);
        let (dir, delta) = evaluate(&logs, today);
        assert_eq!(dir, TrendDirection::Up);
        assert!(delta.unwrap() > BAND_PERCENT);
    }

    #[test]
    fn test_decelerating_series_reads_down() {
        let today = d(2024, 6, 30);
        let mut xps = Vec::new();
        let mut xp = 0i64;
        for i in 0..20 {
            xps.push(xp);
            xp += if i < 10 { 300 } else { 100 };
        }
        let logs = series(today, &xps);
        let (dir, _) = evaluate(&logs, today);
        assert_eq!(dir, TrendDirection::Down);
    }

    #[test]
    fn test_old_points_fall_outside_lookback() {
        let today = d(2024, 6, 30);
        // 20 points but spaced 10 days apart: only 7 fall inside 60 days,
        // below the threshold.
        let logs: Vec<Snapshot> = (0..20)
            .map(|i| Snapshot {
                date: today - chrono::Duration::days((19 - i) * 10),
                level: 100,
                xp: i * 1000,
            })
            .collect();
        let (dir, delta) = evaluate(&logs, today);
        assert_eq!(dir, TrendDirection::Neutral);
        assert_eq!(delta, None);
    }
}
