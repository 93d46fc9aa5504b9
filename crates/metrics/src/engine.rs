// crates/metrics/src/engine.rs
//! Per-character metrics derivation.

use chrono::NaiveDate;
use levellog_types::{DerivedMetrics, Snapshot, TrackingSummary};
use std::collections::{BTreeMap, HashMap};

use crate::streak::{consecutive_days, presence_streak};
use crate::window::{endpoint_rate, trailing_window};
use crate::{eta, trend};

/// Window used by [`compute_summary`] and the rankings views.
pub const SUMMARY_WINDOW_DAYS: u32 = 7;

/// Tunables injected by the caller.
///
/// `target_xp` is deliberately a parameter: the per-level XP requirement is
/// game data this system does not own, and the shipped default is a
/// placeholder, not a real leveling curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsOptions {
    /// Trailing window for the recent daily average (call sites use 7 or 30).
    pub recent_window_days: u32,
    /// XP value the ETA counts down to.
    pub target_xp: i64,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            target_xp: 10_000_000,
        }
    }
}

/// Re-establish the snapshot-sequence invariants: ascending by date, at
/// most one entry per date. On a duplicate date the last occurrence wins,
/// matching the store's upsert policy.
///
/// The store already guarantees both, but every engine entry point runs
/// this anyway so a misbehaving collaborator degrades to correct output
/// instead of wrong math.
pub fn normalize(snapshots: &[Snapshot]) -> Vec<Snapshot> {
    let mut by_date: BTreeMap<NaiveDate, Snapshot> = BTreeMap::new();
    for snap in snapshots {
        by_date.insert(snap.date, snap.clone());
    }
    by_date.into_values().collect()
}

/// Single-day gains: `(date, xp - previous xp)` per snapshot, with the very
/// first snapshot contributing 0. Gains can be negative when XP regressed;
/// callers clamp where display requires it.
///
/// Expects normalized input.
pub fn daily_gains(snapshots: &[Snapshot]) -> Vec<(NaiveDate, i64)> {
    snapshots
        .iter()
        .enumerate()
        .map(|(i, snap)| {
            let gain = if i == 0 {
                0
            } else {
                snap.xp - snapshots[i - 1].xp
            };
            (snap.date, gain)
        })
        .collect()
}

/// Goal-met streak: consecutive days, walking back from today, whose
/// single-day gain met or exceeded `goal_per_day`.
///
/// Strictly stricter than day presence — a day with no snapshot breaks the
/// run, and so does a day that fell short of pace.
pub fn goal_met_streak(snapshots: &[Snapshot], today: NaiveDate, goal_per_day: f64) -> u32 {
    if goal_per_day <= 0.0 {
        return 0;
    }
    let logs = normalize(snapshots);
    let gains: HashMap<NaiveDate, i64> = daily_gains(&logs).into_iter().collect();
    consecutive_days(today, None, |day| {
        gains.get(&day).is_some_and(|&g| g as f64 >= goal_per_day)
    })
}

/// Mean of the strictly-positive single-day gains across the whole history.
fn overall_average(gains: &[(NaiveDate, i64)]) -> f64 {
    let positive: Vec<i64> = gains.iter().map(|&(_, g)| g).filter(|&g| g > 0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    positive.iter().sum::<i64>() as f64 / positive.len() as f64
}

/// Largest single-day gain and its date. Regressions count as 0, so the
/// result is never negative; with no positive gain at all there is no best
/// day to report.
fn best_day(gains: &[(NaiveDate, i64)]) -> (i64, Option<NaiveDate>) {
    let mut best_gain = 0i64;
    let mut best_date = None;
    for &(date, gain) in gains {
        if gain > best_gain {
            best_gain = gain;
            best_date = Some(date);
        }
    }
    (best_gain, best_date)
}

/// Derive the full analytics record for one character.
///
/// Pure: the only inputs are the history, the injected `today`, and the
/// options. Empty input returns [`DerivedMetrics::neutral`], never an error.
pub fn compute_metrics(
    snapshots: &[Snapshot],
    today: NaiveDate,
    opts: &MetricsOptions,
) -> DerivedMetrics {
    let logs = normalize(snapshots);
    let Some(last) = logs.last() else {
        return DerivedMetrics::neutral();
    };

    let recent = trailing_window(&logs, today, opts.recent_window_days);
    let rate = endpoint_rate(recent);

    let gains = daily_gains(&logs);
    let (best_day_gain, best_day_date) = best_day(&gains);

    let eta = eta::estimate(last.xp, opts.target_xp, rate);
    let (trend_direction, trend_delta_percent) = trend::evaluate(&logs, today);

    DerivedMetrics {
        current_level: last.level,
        current_xp: last.xp,
        daily_average_recent: rate,
        daily_average_overall: overall_average(&gains),
        eta_to_target: eta.display,
        eta_days: eta.days,
        streak_count: presence_streak(&logs, today),
        trend_direction,
        trend_delta_percent,
        best_day_gain,
        best_day_date,
    }
}

/// Compact tracking summary for the statistics page: totals, span, and the
/// 7-day rate with its ETA.
pub fn compute_summary(
    snapshots: &[Snapshot],
    today: NaiveDate,
    opts: &MetricsOptions,
) -> TrackingSummary {
    let logs = normalize(snapshots);
    let (current_level, current_xp) = logs.last().map(|s| (s.level, s.xp)).unwrap_or((0, 0));

    let recent = trailing_window(&logs, today, SUMMARY_WINDOW_DAYS);
    let rate = endpoint_rate(recent);
    let eta = eta::estimate(current_xp, opts.target_xp, rate);

    TrackingSummary {
        total_logs: logs.len() as i64,
        current_level,
        current_xp,
        daily_average_recent: rate.round() as i64,
        eta_days: eta.days,
        first_date: logs.first().map(|s| s.date),
        last_date: logs.last().map(|s| s.date),
    }
}
