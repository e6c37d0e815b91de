use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct DebugInfo {
    pub version: String,
    pub git_sha: String,
    pub environment: String,
    pub uptime_seconds: u64,
    pub database_status: String,
    pub database_connections: u32,
    pub idle_connections: usize,
    pub night_window: String,
    pub token_issuer: String,
    pub hs256_fallback: bool,
    pub timestamp: i64,
}

/// Process start, for uptime
static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// Touch the start time so uptime counts from boot rather than first request
pub fn mark_started() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// GET /debug (requires `X-Debug-Key`)
#[utoipa::path(
    get,
    path = "/debug",
    responses(
        (status = 200, description = "Build and runtime diagnostics", body = DebugInfo),
        (status = 401, description = "Missing or wrong debug key"),
        (status = 404, description = "Debug endpoint disabled")
    ),
    tag = "operations"
)]
pub async fn debug_handler(State(state): State<Arc<AppState>>) -> Json<DebugInfo> {
    let db_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let window = state.config.night_window;

    Json(DebugInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_sha: option_env!("GIT_SHA").unwrap_or("unknown").to_string(),
        environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        uptime_seconds: START_TIME.elapsed().as_secs(),
        database_status: db_status,
        database_connections: state.db.size(),
        idle_connections: state.db.num_idle(),
        night_window: format!("{:02}:00-{:02}:59", window.start_hour, window.end_hour),
        token_issuer: state.config.token_issuer(),
        hs256_fallback: state.config.jwt_secret.is_some(),
        timestamp: Utc::now().timestamp(),
    })
}
