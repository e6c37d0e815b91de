use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::AppState;

pub const DEBUG_KEY_HEADER: &str = "X-Debug-Key";

/// Guards operational endpoints behind `X-Debug-Key`. With no key configured
/// the endpoints are hidden entirely.
pub async fn require_debug_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected_key = state.config.debug_key.as_bytes();
    if expected_key.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let provided_key = request
        .headers()
        .get(DEBUG_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if expected_key.ct_eq(provided_key.as_bytes()).into() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected debug key");
        Err(StatusCode::UNAUTHORIZED)
    }
}
