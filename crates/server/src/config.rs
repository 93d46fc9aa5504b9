// crates/server/src/config.rs
//! Engine configuration injected into every metrics computation.

use levellog_metrics::MetricsOptions;

/// Placeholder target: roughly one level's worth of XP at high levels.
/// Not real game data — override with `LEVELLOG_TARGET_XP`.
const DEFAULT_TARGET_XP: i64 = 10_000_000;

const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Request-independent engine tunables, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// XP value ETAs count down to.
    pub target_xp: i64,
    /// Recent-average window used when a request does not pick one.
    pub default_window_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_xp: DEFAULT_TARGET_XP,
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    /// Resolve from the environment, falling back to defaults on missing
    /// or unparseable values.
    pub fn from_env() -> Self {
        let target_xp = std::env::var("LEVELLOG_TARGET_XP")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &i64| v > 0)
            .unwrap_or(DEFAULT_TARGET_XP);
        Self {
            target_xp,
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Options for one engine invocation with the given window.
    pub fn metrics_options(&self, window_days: u32) -> MetricsOptions {
        MetricsOptions {
            recent_window_days: window_days,
            target_xp: self.target_xp,
        }
    }
}
