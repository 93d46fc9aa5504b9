// crates/metrics/src/rankings.rs
//! Cross-character leaderboards.
//!
//! Each character is scored independently from its trailing-7-day slice
//! (presence streak + endpoint-difference rate), then collected into three
//! views: global, per-world, per-vocation. Sorting is descending by streak
//! and stable — two characters with equal streaks keep their input order.

use chrono::NaiveDate;
use levellog_types::{CharacterMeta, RankingEntry, Rankings, Snapshot};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::engine::{normalize, SUMMARY_WINDOW_DAYS};
use crate::streak::windowed_presence_streak;
use crate::window::endpoint_rate;

/// Normalize a vocation label for grouping: first character uppercased,
/// the rest lowercased — "DRUID", "druid" and "Druid" all become "Druid".
pub fn normalize_vocation(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Score one character from its recent slice.
///
/// A character with no snapshots in the window still gets an entry with
/// all-zero metrics — inactivity demotes, it never removes.
fn score(meta: &CharacterMeta, logs: &[Snapshot], today: NaiveDate) -> RankingEntry {
    let logs = normalize(logs);
    let (current_level, rate, streak) = match logs.last() {
        Some(last) => (
            last.level,
            endpoint_rate(&logs),
            windowed_presence_streak(&logs, today, SUMMARY_WINDOW_DAYS),
        ),
        None => (0, 0.0, 0),
    };
    RankingEntry {
        character_id: meta.id.clone(),
        name: meta.name.clone(),
        world: meta.world.clone(),
        vocation: meta.vocation.clone(),
        streak_count: streak,
        current_level,
        daily_average_recent: rate,
    }
}

/// Build the three leaderboard views from all characters and their
/// last-7-days snapshot slices.
pub fn compute_rankings(
    characters: &[CharacterMeta],
    recent_logs: &HashMap<String, Vec<Snapshot>>,
    today: NaiveDate,
) -> Rankings {
    let entries: Vec<RankingEntry> = characters
        .iter()
        .map(|meta| {
            let logs = recent_logs.get(&meta.id).map(Vec::as_slice).unwrap_or(&[]);
            score(meta, logs, today)
        })
        .collect();

    let mut global = entries.clone();
    // sort_by_key is stable: ties keep encounter order.
    global.sort_by_key(|e| Reverse(e.streak_count));

    let mut by_world: BTreeMap<String, Vec<RankingEntry>> = BTreeMap::new();
    let mut by_vocation: BTreeMap<String, Vec<RankingEntry>> = BTreeMap::new();
    for entry in &entries {
        by_world
            .entry(entry.world.clone())
            .or_default()
            .push(entry.clone());
        by_vocation
            .entry(normalize_vocation(&entry.vocation))
            .or_default()
            .push(entry.clone());
    }
    for group in by_world.values_mut().chain(by_vocation.values_mut()) {
        group.sort_by_key(|e| Reverse(e.streak_count));
    }

    let mut distinct_vocations: Vec<String> = Vec::new();
    for meta in characters {
        if !distinct_vocations.contains(&meta.vocation) {
            distinct_vocations.push(meta.vocation.clone());
        }
    }

    Rankings {
        global,
        by_world,
        by_vocation,
        distinct_vocations,
    }
}
