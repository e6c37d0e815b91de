use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, FixedOffset, Utc};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    domain::insights::build_report,
    extractors::AuthenticatedUser,
    models::{ActivityLog, AnalyticsReport, ExpertTip},
    AppError, AppResult, AppState,
};

const DEFAULT_DAYS: i64 = 30;
const MAX_DAYS: i64 = 90;
// UTC-14:00 .. UTC+14:00
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    /// Look-back window in days (1-90, default 30)
    pub days: Option<i64>,
    /// Caller's UTC offset in minutes, used to bucket records by local date
    pub tz_offset_minutes: Option<i32>,
}

impl AnalyticsQuery {
    fn resolve(&self) -> AppResult<(i64, FixedOffset)> {
        let days = self.days.unwrap_or(DEFAULT_DAYS);
        if !(1..=MAX_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_DAYS
            )));
        }

        let minutes = self.tz_offset_minutes.unwrap_or(0);
        let offset = (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES)
            .contains(&minutes)
            .then(|| FixedOffset::east_opt(minutes * 60))
            .flatten()
            .ok_or_else(|| AppError::BadRequest(format!("Invalid tz_offset_minutes: {}", minutes)))?;

        Ok((days, offset))
    }
}

/// GET /api/analytics?days=&tz_offset_minutes=
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Daily sleep and feeding summaries with trend and tips", body = AnalyticsReport),
        (status = 400, description = "Invalid window or offset"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analytics",
    security(("bearer_auth" = []))
)]
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsReport>> {
    let report = load_report(&state, &auth, &query).await?;
    Ok(Json(report))
}

/// GET /api/analytics/tips?days=&tz_offset_minutes=
#[utoipa::path(
    get,
    path = "/api/analytics/tips",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Expert tips derived from recent activity", body = Vec<ExpertTip>),
        (status = 400, description = "Invalid window or offset")
    ),
    tag = "analytics",
    security(("bearer_auth" = []))
)]
pub async fn get_tips(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<Vec<ExpertTip>>> {
    let report = load_report(&state, &auth, &query).await?;
    Ok(Json(report.tips))
}

async fn load_report(
    state: &AppState,
    auth: &AuthenticatedUser,
    query: &AnalyticsQuery,
) -> AppResult<AnalyticsReport> {
    let (days, offset) = query.resolve()?;
    let since = Utc::now() - Duration::days(days);

    let logs = sqlx::query_as::<_, ActivityLog>(
        r#"
        SELECT * FROM activity_logs
        WHERE user_id = $1 AND created_at >= $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(auth.user_id)
    .bind(since)
    .fetch_all(&state.db)
    .await?;

    tracing::debug!(user_id = %auth.user_id, days, records = logs.len(), "Building analytics report");

    Ok(build_report(&logs, days, offset, state.config.night_window))
}
