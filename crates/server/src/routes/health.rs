// crates/server/src/routes/health.rs
//! Liveness endpoint for the dashboard.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Heartbeat payload: process identity plus enough store/engine detail to
/// spot a misconfigured instance from the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Number of characters currently registered.
    pub tracked_characters: usize,
    /// The ETA target this instance resolved at startup.
    pub target_xp: i64,
}

/// GET /api/health - Liveness check.
///
/// Touches the store, so a broken database surfaces here as a 500 instead
/// of a green dashboard over dead reads.
async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let tracked_characters = state.db.list_characters().await?.len();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        tracked_characters,
        target_xp: state.engine.target_xp,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serializes_camel_case() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.3.0".to_string(),
            uptime_secs: 42,
            tracked_characters: 3,
            target_xp: 10_000_000,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptimeSecs\":42"));
        assert!(json.contains("\"trackedCharacters\":3"));
        assert!(json.contains("\"targetXp\":10000000"));
    }
}
