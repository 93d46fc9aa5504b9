// crates/server/src/main.rs
//! Levellog server binary.
//!
//! Opens the SQLite store, resolves the engine config from the environment,
//! and serves the dashboard API.

use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use levellog_db::Database;
use levellog_server::{create_app, AppState, EngineConfig};

/// Default port for the server.
const DEFAULT_PORT: u16 = 47631;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("LEVELLOG_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let db = Database::open_default().await?;
    tracing::info!(db_path = %db.db_path().display(), "Database ready");

    let engine = EngineConfig::from_env();
    tracing::info!(
        target_xp = engine.target_xp,
        default_window_days = engine.default_window_days,
        "Engine config resolved"
    );

    let state = AppState::new(db, engine);
    let app = create_app(state);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    eprintln!(
        "levellog v{} \u{2192} http://localhost:{}\n",
        env!("CARGO_PKG_VERSION"),
        port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
