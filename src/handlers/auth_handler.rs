use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    extractors::AuthenticatedUser,
    models::{Profile, UpdateProfileInput},
    AppError, AppResult, AppState,
};

/// GET /api/auth/me
///
/// Creates the caller's profile on first sight and keeps its email in step
/// with the token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current authenticated user's profile", body = Profile),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<Json<Profile>> {
    let email = auth.email.clone().unwrap_or_default();

    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (user_id, email)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE
        SET email = CASE WHEN EXCLUDED.email = '' THEN profiles.email ELSE EXCLUDED.email END,
            updated_at = CASE WHEN EXCLUDED.email = '' OR EXCLUDED.email = profiles.email
                              THEN profiles.updated_at ELSE now() END
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(&email)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}

/// PUT /api/profile
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Profile not created yet")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<Profile>> {
    if input.first_name.is_none() && input.last_name.is_none() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let profile = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles
        SET first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            updated_at = now()
        WHERE user_id = $3
        RETURNING *
        "#,
    )
    .bind(input.first_name.as_deref().map(str::trim))
    .bind(input.last_name.as_deref().map(str::trim))
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Profile not found; call /api/auth/me first".to_string()))?;

    Ok(Json(profile))
}
