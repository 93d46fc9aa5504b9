// crates/server/src/routes/rankings.rs
//! Leaderboard endpoint across all tracked characters.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{Duration, Utc};
use levellog_metrics::compute_rankings;
use levellog_types::{CharacterMeta, Rankings};

use crate::error::ApiResult;
use crate::state::AppState;

/// The leaderboard looks at the trailing week of activity.
const RANKING_WINDOW_DAYS: i64 = 7;

/// GET /api/rankings - Global, per-world, and per-vocation leaderboards.
///
/// One windowed query fetches every character's recent slice; the ranking
/// engine does the rest in memory.
async fn rankings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Rankings>> {
    let today = Utc::now().date_naive();
    let from = today - Duration::days(RANKING_WINDOW_DAYS);

    let characters = state.db.list_characters().await?;
    let metas: Vec<CharacterMeta> = characters.iter().map(CharacterMeta::from).collect();
    let recent = state.db.recent_logs_by_character(from).await?;

    tracing::debug!(
        characters = metas.len(),
        active = recent.len(),
        "Computing rankings"
    );

    Ok(Json(compute_rankings(&metas, &recent, today)))
}

/// Create the rankings routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/rankings", get(rankings))
}
