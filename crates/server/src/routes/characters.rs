// crates/server/src/routes/characters.rs
//! Character registry and snapshot ingestion endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use levellog_types::{Character, Snapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for POST /api/characters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    pub name: String,
    pub world: String,
    pub vocation: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "main".to_string()
}

/// Request body for POST /api/characters/{id}/logs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub date: NaiveDate,
    pub level: i64,
    pub xp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterListResponse {
    pub characters: Vec<Character>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogListResponse {
    pub character_id: String,
    pub logs: Vec<Snapshot>,
}

/// GET /api/characters - List all tracked characters, oldest first.
async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CharacterListResponse>> {
    let characters = state.db.list_characters().await?;
    Ok(Json(CharacterListResponse { characters }))
}

/// POST /api/characters - Register a new character.
///
/// The server assigns the id. A (name, world) pair already on record is
/// rejected with 409 so the same character cannot be tracked twice.
async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCharacterRequest>,
) -> ApiResult<(StatusCode, Json<Character>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    let world = req.world.trim();
    if world.is_empty() {
        return Err(ApiError::BadRequest("world must not be empty".to_string()));
    }

    let existing = state.db.list_characters().await?;
    if existing
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name) && c.world.eq_ignore_ascii_case(world))
    {
        return Err(ApiError::Conflict(format!(
            "character '{name}' on world '{world}' is already tracked"
        )));
    }

    let character = Character {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        world: world.to_string(),
        vocation: req.vocation.trim().to_string(),
        category: req.category,
        created_at: Some(chrono::Utc::now().timestamp()),
    };
    state.db.insert_character(&character).await?;

    tracing::info!(
        character_id = %character.id,
        name = %character.name,
        world = %character.world,
        "Character registered"
    );

    Ok((StatusCode::CREATED, Json(character)))
}

/// DELETE /api/characters/{id} - Remove a character and its history.
async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.db.delete_character(&id).await? {
        return Err(ApiError::CharacterNotFound(id));
    }
    tracing::info!(character_id = %id, "Character deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/characters/{id}/logs - Full snapshot history, ascending by date.
async fn list_logs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LogListResponse>> {
    if state.db.get_character(&id).await?.is_none() {
        return Err(ApiError::CharacterNotFound(id));
    }
    let logs = state.db.logs_for_character(&id).await?;
    Ok(Json(LogListResponse {
        character_id: id,
        logs,
    }))
}

/// POST /api/characters/{id}/logs - Record one daily snapshot.
///
/// A second snapshot for the same date replaces the first (last write
/// wins). Negative level or XP is rejected with 400.
async fn create_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CreateLogRequest>,
) -> ApiResult<(StatusCode, Json<Snapshot>)> {
    if req.level < 0 {
        return Err(ApiError::BadRequest(format!(
            "level must be non-negative, got {}",
            req.level
        )));
    }
    if req.xp < 0 {
        return Err(ApiError::BadRequest(format!(
            "xp must be non-negative, got {}",
            req.xp
        )));
    }
    if state.db.get_character(&id).await?.is_none() {
        return Err(ApiError::CharacterNotFound(id));
    }

    let snapshot = Snapshot {
        date: req.date,
        level: req.level,
        xp: req.xp,
    };
    state.db.upsert_snapshot(&id, &snapshot).await?;

    tracing::debug!(
        character_id = %id,
        date = %snapshot.date,
        level = snapshot.level,
        "Snapshot recorded"
    );

    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// Create the character routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/characters", get(list_characters).post(create_character))
        .route(
            "/characters/{id}",
            axum::routing::delete(delete_character),
        )
        .route("/characters/{id}/logs", post(create_log).get(list_logs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_category() {
        let req: CreateCharacterRequest =
            serde_json::from_str(r#"{"name":"Thorn","world":"Antica","vocation":"druid"}"#)
                .unwrap();
        assert_eq!(req.category, "main");
    }

    #[test]
    fn test_log_request_parses_iso_date() {
        let req: CreateLogRequest =
            serde_json::from_str(r#"{"date":"2024-03-01","level":120,"xp":5400000}"#).unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(req.xp, 5_400_000);
    }

    #[test]
    fn test_log_request_rejects_malformed_date() {
        let result: Result<CreateLogRequest, _> =
            serde_json::from_str(r#"{"date":"03/01/2024","level":120,"xp":5400000}"#);
        assert!(result.is_err());
    }
}
