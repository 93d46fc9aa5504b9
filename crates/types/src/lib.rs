// crates/types/src/lib.rs
//! Shared domain and API types for levellog.
//!
//! Everything the HTTP layer serializes lives here so the frontend types
//! (generated via ts-rs into `src/types/generated/`) stay in one place.
//! These are plain records — all derivation logic lives in
//! `levellog-metrics`, all persistence in `levellog-db`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

// ============================================================================
// Store-side records
// ============================================================================

/// One dated observation of a character's level and cumulative XP.
///
/// At most one snapshot exists per character per day (the store enforces
/// this; duplicate ingestion is last-write-wins). XP is expected to be
/// non-decreasing over time, but consumers must tolerate regressions —
/// a character reset produces one without warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Calendar date of the observation (day granularity, no time-of-day).
    pub date: NaiveDate,
    /// Observed character level at that date.
    #[ts(type = "number")]
    pub level: i64,
    /// Cumulative experience at that date.
    #[ts(type = "number")]
    pub xp: i64,
}

/// A tracked character as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Game world the character lives on. Grouping key for rankings,
    /// matched exactly as stored (case-sensitive).
    pub world: String,
    /// Free-form vocation label as entered ("druid", "KNIGHT", ...).
    /// Rankings normalize this for grouping; the raw value is preserved.
    pub vocation: String,
    pub category: String,
    /// Unix timestamp of registration.
    #[ts(type = "number | null")]
    pub created_at: Option<i64>,
}

/// The slice of character metadata the ranking engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct CharacterMeta {
    pub id: String,
    pub name: String,
    pub world: String,
    pub vocation: String,
}

impl From<&Character> for CharacterMeta {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            world: c.world.clone(),
            vocation: c.vocation.clone(),
        }
    }
}

// ============================================================================
// Derived metrics
// ============================================================================

/// Whether a character's recent rate of gain is accelerating, decelerating,
/// or stable relative to an earlier period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    /// Severity label the dashboard maps to card colors
    /// ("success" / "danger" / "neutral").
    pub fn severity(&self) -> &'static str {
        match self {
            Self::Up => "success",
            Self::Down => "danger",
            Self::Neutral => "neutral",
        }
    }
}

/// Full per-character analytics record, recomputed from scratch on every
/// request — nothing here is ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Level from the chronologically last snapshot (0 with no data).
    #[ts(type = "number")]
    pub current_level: i64,
    /// Cumulative XP from the chronologically last snapshot.
    #[ts(type = "number")]
    pub current_xp: i64,
    /// Mean XP/day over the trailing window (endpoint difference over
    /// span, not a mean of day-to-day deltas). 0 with fewer than 2 points.
    pub daily_average_recent: f64,
    /// Mean of the strictly-positive single-day gains over the whole
    /// history. 0 when no positive gain exists.
    pub daily_average_overall: f64,
    /// Human-readable ETA to the target XP: "37d", "14m", or "N/A".
    pub eta_to_target: String,
    /// ETA in whole days; `None` when the recent rate is zero or negative.
    #[ts(type = "number | null")]
    pub eta_days: Option<i64>,
    /// Consecutive calendar days with a snapshot, walking back from today.
    pub streak_count: u32,
    pub trend_direction: TrendDirection,
    /// Recent-vs-earlier rate change in percent; `None` below the data
    /// threshold or when the earlier rate is zero.
    pub trend_delta_percent: Option<f64>,
    /// Largest single-day gain seen (never negative; regressions clamp to 0).
    #[ts(type = "number")]
    pub best_day_gain: i64,
    pub best_day_date: Option<NaiveDate>,
}

impl DerivedMetrics {
    /// The defined neutral record for an empty snapshot history.
    /// Insufficient data is never an error, always this.
    pub fn neutral() -> Self {
        Self {
            current_level: 0,
            current_xp: 0,
            daily_average_recent: 0.0,
            daily_average_overall: 0.0,
            eta_to_target: "N/A".to_string(),
            eta_days: None,
            streak_count: 0,
            trend_direction: TrendDirection::Neutral,
            trend_delta_percent: None,
            best_day_gain: 0,
            best_day_date: None,
        }
    }
}

/// Compact per-character tracking summary for the statistics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct TrackingSummary {
    /// Number of snapshots on record.
    #[ts(type = "number")]
    pub total_logs: i64,
    #[ts(type = "number")]
    pub current_level: i64,
    #[ts(type = "number")]
    pub current_xp: i64,
    /// 7-day endpoint-difference average, rounded to whole XP.
    #[ts(type = "number")]
    pub daily_average_recent: i64,
    #[ts(type = "number | null")]
    pub eta_days: Option<i64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

// ============================================================================
// Rankings
// ============================================================================

/// One character's position-relevant metrics in a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub character_id: String,
    pub name: String,
    pub world: String,
    /// Raw vocation as stored (group keys are normalized separately).
    pub vocation: String,
    /// Consecutive active days within the trailing 7-day window.
    pub streak_count: u32,
    #[ts(type = "number")]
    pub current_level: i64,
    pub daily_average_recent: f64,
}

/// The three leaderboard views plus the vocation filter options.
///
/// Group maps only contain observed keys — a world or vocation with zero
/// characters never materializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    /// All characters, sorted descending by streak (stable on ties).
    pub global: Vec<RankingEntry>,
    /// Partitioned by exact `world` string.
    pub by_world: BTreeMap<String, Vec<RankingEntry>>,
    /// Partitioned by normalized vocation ("DRUID"/"druid" → "Druid").
    pub by_vocation: BTreeMap<String, Vec<RankingEntry>>,
    /// Un-normalized distinct vocation values, in first-seen order.
    pub distinct_vocations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snap = Snapshot {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            level: 120,
            xp: 5_400_000,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-15","level":120,"xp":5400000}"#);
    }

    #[test]
    fn test_neutral_metrics_shape() {
        let m = DerivedMetrics::neutral();
        assert_eq!(m.current_level, 0);
        assert_eq!(m.daily_average_recent, 0.0);
        assert_eq!(m.eta_to_target, "N/A");
        assert_eq!(m.eta_days, None);
        assert_eq!(m.streak_count, 0);
        assert_eq!(m.trend_direction, TrendDirection::Neutral);
        assert_eq!(m.trend_delta_percent, None);
    }

    #[test]
    fn test_trend_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&TrendDirection::Neutral).unwrap(),
            "\"neutral\""
        );
    }

    #[test]
    fn test_trend_direction_severity() {
        assert_eq!(TrendDirection::Up.severity(), "success");
        assert_eq!(TrendDirection::Down.severity(), "danger");
        assert_eq!(TrendDirection::Neutral.severity(), "neutral");
    }

    #[test]
    fn test_derived_metrics_serializes_camel_case() {
        let m = DerivedMetrics::neutral();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"currentLevel\":0"));
        assert!(json.contains("\"dailyAverageRecent\":0.0"));
        assert!(json.contains("\"etaToTarget\":\"N/A\""));
        assert!(json.contains("\"streakCount\":0"));
        assert!(json.contains("\"trendDirection\":\"neutral\""));
        assert!(json.contains("\"bestDayDate\":null"));
    }

    #[test]
    fn test_character_meta_from_character() {
        let c = Character {
            id: "c1".into(),
            name: "Thorn".into(),
            world: "Antica".into(),
            vocation: "druid".into(),
            category: "main".into(),
            created_at: Some(1_706_200_000),
        };
        let meta = CharacterMeta::from(&c);
        assert_eq!(meta.id, "c1");
        assert_eq!(meta.vocation, "druid");
    }
}
