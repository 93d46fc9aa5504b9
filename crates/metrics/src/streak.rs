// crates/metrics/src/streak.rs
//! Consecutive-day streak walking.
//!
//! The dashboard shows three streak flavors (day-presence, 7-day capped
//! presence for rankings, and goal-met pace). They are all the same walk:
//! step backward one calendar day at a time from "today" and count while a
//! per-day predicate holds. Keeping the walk in one place stops the three
//! call sites from drifting apart.

use chrono::{Duration, NaiveDate};
use levellog_types::Snapshot;
use std::collections::HashSet;

/// Count consecutive qualifying calendar days, walking backward from
/// `today`. Stops at the first day where `qualifies` is false, or at
/// `max_days` when a cap is given.
///
/// Comparison is by calendar date only — a snapshot taken at 23:59 and a
/// walk evaluated at 00:01 the next day still line up, because
/// time-of-day never enters the picture.
pub fn consecutive_days<F>(today: NaiveDate, max_days: Option<u32>, qualifies: F) -> u32
where
    F: Fn(NaiveDate) -> bool,
{
    let mut count: u32 = 0;
    loop {
        if let Some(cap) = max_days {
            if count >= cap {
                return count;
            }
        }
        let day = today - Duration::days(i64::from(count));
        if qualifies(day) {
            count += 1;
        } else {
            return count;
        }
    }
}

/// Day-presence streak: consecutive days with any snapshot, unbounded.
pub fn presence_streak(snapshots: &[Snapshot], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = snapshots.iter().map(|s| s.date).collect();
    consecutive_days(today, None, |d| days.contains(&d))
}

/// Day-presence streak capped at `window_days` — the rankings variant,
/// which only ever looks at the trailing 7-day slice.
pub fn windowed_presence_streak(
    snapshots: &[Snapshot],
    today: NaiveDate,
    window_days: u32,
) -> u32 {
    let days: HashSet<NaiveDate> = snapshots.iter().map(|s| s.date).collect();
    consecutive_days(today, Some(window_days), |d| days.contains(&d))
}
