// crates/server/src/lib.rs
//! Levellog server library.
//!
//! Axum-based HTTP server for the levellog dashboard: a REST API over the
//! character registry, daily XP snapshot ingestion, derived metrics, and
//! leaderboards. All analytics are recomputed per request by the pure
//! engines in `levellog-metrics`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::EngineConfig;
pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, characters, metrics, rankings)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
