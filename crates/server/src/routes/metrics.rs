// crates/server/src/routes/metrics.rs
//! Per-character derived metrics and tracking summary endpoints.
//!
//! These handlers are thin: resolve "today" once at the boundary, load the
//! history, and hand everything to the pure engine in `levellog-metrics`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use levellog_metrics::{compute_metrics, compute_summary};
use levellog_types::{DerivedMetrics, Snapshot, TrackingSummary};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /api/characters/{id}/metrics.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    /// Recent-average window in days. Only the dashboard's two views
    /// exist: 7 or 30.
    pub window: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub character_id: String,
    pub summary: TrackingSummary,
    pub logs: Vec<Snapshot>,
}

/// GET /api/characters/{id}/metrics?window=30 - Full derived metrics.
async fn character_metrics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<MetricsQuery>,
) -> ApiResult<Json<DerivedMetrics>> {
    let window = match query.window {
        None => state.engine.default_window_days,
        Some(w @ (7 | 30)) => w,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "window must be 7 or 30, got {other}"
            )));
        }
    };

    if state.db.get_character(&id).await?.is_none() {
        return Err(ApiError::CharacterNotFound(id));
    }

    let logs = state.db.logs_for_character(&id).await?;
    let today = Utc::now().date_naive();
    let metrics = compute_metrics(&logs, today, &state.engine.metrics_options(window));
    Ok(Json(metrics))
}

/// GET /api/characters/{id}/stats - Tracking summary plus the raw history
/// the statistics page charts.
async fn character_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatsResponse>> {
    if state.db.get_character(&id).await?.is_none() {
        return Err(ApiError::CharacterNotFound(id));
    }

    let logs = state.db.logs_for_character(&id).await?;
    let today = Utc::now().date_naive();
    let opts = state
        .engine
        .metrics_options(state.engine.default_window_days);
    let summary = compute_summary(&logs, today, &opts);
    Ok(Json(StatsResponse {
        character_id: id,
        summary,
        logs,
    }))
}

/// Create the metrics routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/characters/{id}/metrics", get(character_metrics))
        .route("/characters/{id}/stats", get(character_stats))
}
