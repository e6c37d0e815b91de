use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::{auth, AppError, AppState};

/// Cookie the browser client stores the access token in
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Extracts the access token from the Authorization header, falling back to the session cookie
fn extract_token_from_request(parts: &Parts) -> Option<String> {
    if let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    let cookie_str = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// The signed-in parent. Every query for user-owned rows is scoped by `user_id`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_token_from_request(parts);
        let state = state.clone();

        async move {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized(
                    "Missing authentication: no Authorization header or session cookie".to_string(),
                )
            })?;

            let claims = auth::validate_jwt(
                &token,
                state.key_provider.as_ref(),
                state.config.jwt_secret.as_deref(),
                &state.config.token_issuer(),
            )
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                AppError::Unauthorized(e)
            })?;

            let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
                tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
                AppError::Unauthorized("Invalid token subject".to_string())
            })?;

            Ok(AuthenticatedUser {
                user_id,
                email: claims.email,
            })
        }
    }
}
