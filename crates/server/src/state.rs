// crates/server/src/state.rs
//! Application state for the Axum server.

use crate::config::EngineConfig;
use levellog_db::Database;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state accessible from all route handlers.
///
/// Deliberately small: the engines are pure functions, so the only shared
/// pieces are the store handle and the startup-resolved engine config —
/// no caches, no per-request mutable state.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Database handle for character/log queries.
    pub db: Database,
    /// Engine tunables (target XP, default window).
    pub engine: EngineConfig,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database, engine: EngineConfig) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
            engine,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
