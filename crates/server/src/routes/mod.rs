//! API route handlers for the levellog server.

pub mod characters;
pub mod health;
pub mod metrics;
pub mod rankings;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET    /api/health - Health check
/// - GET    /api/characters - List all tracked characters
/// - POST   /api/characters - Register a new character
/// - DELETE /api/characters/{id} - Remove a character and its history
/// - GET    /api/characters/{id}/logs - Full ordered snapshot history
/// - POST   /api/characters/{id}/logs - Record one daily snapshot (upsert)
/// - GET    /api/characters/{id}/metrics - Derived metrics (?window=7|30)
/// - GET    /api/characters/{id}/stats - Tracking summary plus raw logs
/// - GET    /api/rankings - Global / per-world / per-vocation leaderboards
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", characters::router())
        .nest("/api", metrics::router())
        .nest("/api", rankings::router())
        .with_state(state)
}
