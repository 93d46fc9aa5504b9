// crates/metrics/src/lib.rs
//! Pure metrics and ranking engines.
//!
//! Everything in this crate is a synchronous, side-effect-free function of
//! its inputs: an ordered snapshot history, an injected "today", and a small
//! options record. No clock reads, no I/O, no retained state — the same
//! inputs always produce bit-identical output, and insufficient data always
//! yields a defined neutral value instead of an error.
//!
//! The store hands us histories that are already sorted and deduplicated,
//! but [`engine::normalize`] re-establishes both invariants on every entry
//! point, so callers may pass raw unordered slices.

pub mod engine;
pub mod eta;
pub mod rankings;
pub mod streak;
pub mod trend;
pub mod window;

pub use engine::{compute_metrics, compute_summary, daily_gains, goal_met_streak, MetricsOptions};
pub use eta::Eta;
pub use rankings::{compute_rankings, normalize_vocation};
pub use streak::{consecutive_days, presence_streak, windowed_presence_streak};
pub use trend::evaluate as evaluate_trend;
pub use window::{endpoint_rate, trailing_window};
