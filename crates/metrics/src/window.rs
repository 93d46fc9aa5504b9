// crates/metrics/src/window.rs
//! Trailing-window selection and the endpoint-difference daily rate.

use chrono::{Duration, NaiveDate};
use levellog_types::Snapshot;

/// Slice of `snapshots` whose date falls within the trailing `days`-day
/// window ending at `today` (inclusive on both ends).
///
/// Requires the input sorted ascending by date — callers go through
/// [`crate::engine::normalize`] first.
pub fn trailing_window(snapshots: &[Snapshot], today: NaiveDate, days: u32) -> &[Snapshot] {
    let cutoff = today - Duration::days(i64::from(days));
    let start = snapshots.partition_point(|s| s.date < cutoff);
    &snapshots[start..]
}

/// Mean daily rate over a window: `(last.xp - first.xp) / (count - 1)`.
///
/// This is the endpoint difference spread over the number of intervals in
/// the window, NOT a mean of day-to-day deltas — the two disagree whenever
/// days are missing, and the dashboard's displayed figures use this one.
/// Fewer than 2 points means no interval to measure: the rate is 0.
///
/// The result can be negative when XP regressed across the window (e.g. a
/// character reset); ETA handling treats any non-positive rate as "no
/// usable rate".
pub fn endpoint_rate(window: &[Snapshot]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let first = window[0].xp;
    let last = window[window.len() - 1].xp;
    (last - first) as f64 / (window.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snap(date: NaiveDate, xp: i64) -> Snapshot {
        Snapshot { date, level: 100, xp }
    }

    #[test]
    fn test_trailing_window_filters_old_snapshots() {
        let logs = vec![
            snap(d(2024, 1, 1), 0),
            snap(d(2024, 1, 10), 100),
            snap(d(2024, 1, 20), 250),
        ];
        let win = trailing_window(&logs, d(2024, 1, 20), 7);
        assert_eq!(win.len(), 1);
        assert_eq!(win[0].date, d(2024, 1, 20));
    }

    #[test]
    fn test_trailing_window_cutoff_is_inclusive() {
        let logs = vec![snap(d(2024, 1, 13), 0), snap(d(2024, 1, 20), 700)];
        // 2024-01-20 minus 7 days is exactly 2024-01-13.
        let win = trailing_window(&logs, d(2024, 1, 20), 7);
        assert_eq!(win.len(), 2);
    }

    #[test]
    fn test_trailing_window_empty_input() {
        let win = trailing_window(&[], d(2024, 1, 20), 30);
        assert!(win.is_empty());
    }

    #[test]
    fn test_endpoint_rate_five_day_example() {
        // Snapshots 2024-01-01..05 with xp [0,100,250,400,600]:
        // (600 - 0) / 4 = 150.
        let logs: Vec<Snapshot> = [0, 100, 250, 400, 600]
            .iter()
            .enumerate()
            .map(|(i, &xp)| snap(d(2024, 1, 1 + i as u32), xp))
            .collect();
        let win = trailing_window(&logs, d(2024, 1, 5), 5);
        assert_eq!(win.len(), 5);
        assert_eq!(endpoint_rate(win), 150.0);
    }

    #[test]
    fn test_endpoint_rate_single_point_is_zero() {
        assert_eq!(endpoint_rate(&[snap(d(2024, 1, 1), 500)]), 0.0);
        assert_eq!(endpoint_rate(&[]), 0.0);
    }

    #[test]
    fn test_endpoint_rate_not_mean_of_deltas() {
        // Gaps in the calendar don't matter: only endpoints and point count.
        let logs = vec![
            snap(d(2024, 1, 1), 0),
            snap(d(2024, 1, 3), 90),
            snap(d(2024, 1, 9), 300),
        ];
        assert_eq!(endpoint_rate(&logs), 150.0);
    }

    #[test]
    fn test_endpoint_rate_tolerates_regression() {
        // XP going down yields a negative rate, not a panic.
        let logs = vec![snap(d(2024, 1, 1), 1000), snap(d(2024, 1, 2), 400)];
        assert_eq!(endpoint_rate(&logs), -600.0);
    }
}
