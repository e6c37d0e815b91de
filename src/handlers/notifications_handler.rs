use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    domain::{notifications::suggested_age, recommendations::schedule_data_for_age},
    extractors::AuthenticatedUser,
    models::{NotificationDecisionInput, NotificationMutationResponse, ScheduleNotification},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListNotificationsQuery {
    /// Only notifications not yet marked read
    #[serde(default)]
    pub unread_only: bool,
}

/// GET /api/notifications?unread_only=
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(ListNotificationsQuery),
    responses(
        (status = 200, description = "Schedule notifications, newest first", body = Vec<ScheduleNotification>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<Vec<ScheduleNotification>>> {
    let sql = if query.unread_only {
        "SELECT * FROM schedule_notifications WHERE user_id = $1 AND is_read = false ORDER BY created_at DESC"
    } else {
        "SELECT * FROM schedule_notifications WHERE user_id = $1 ORDER BY created_at DESC"
    };

    let notifications = sqlx::query_as::<_, ScheduleNotification>(sql)
        .bind(auth.user_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(notifications))
}

/// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = ScheduleNotification),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<ScheduleNotification>> {
    let notification = sqlx::query_as::<_, ScheduleNotification>(
        r#"
        UPDATE schedule_notifications
        SET is_read = true, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(notification_id)
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| not_found(notification_id))?;

    Ok(Json(notification))
}

/// POST /api/notifications/{id}/decision - Approve or dismiss a suggested change
///
/// Approving an age update moves the linked schedule to the suggested age and
/// regenerates its timetable.
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/decision",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    request_body = NotificationDecisionInput,
    responses(
        (status = 200, description = "Decision recorded", body = ScheduleNotification),
        (status = 404, description = "Notification not found"),
        (status = 409, description = "Decision already recorded")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn decide(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
    auth: AuthenticatedUser,
    Json(input): Json<NotificationDecisionInput>,
) -> AppResult<Json<ScheduleNotification>> {
    let mut tx = state.db.begin().await?;

    let current = sqlx::query_as::<_, ScheduleNotification>(
        "SELECT * FROM schedule_notifications WHERE id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(notification_id)
    .bind(auth.user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| not_found(notification_id))?;

    if current.is_approved.is_some() {
        return Err(AppError::Conflict(format!(
            "Notification {} has already been decided",
            notification_id
        )));
    }

    let notification = sqlx::query_as::<_, ScheduleNotification>(
        r#"
        UPDATE schedule_notifications
        SET is_approved = $1, is_read = true, updated_at = now()
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(input.approved)
    .bind(notification_id)
    .bind(auth.user_id)
    .fetch_one(&mut *tx)
    .await?;

    if input.approved {
        if let Some(age) = suggested_age(&notification.suggested_changes) {
            let schedule_data = schedule_data_for_age(age)?;

            sqlx::query(
                r#"
                UPDATE sleep_schedules
                SET baby_age_months = $1,
                    schedule_data = $2,
                    age_recorded_at = now(),
                    updated_at = now()
                WHERE id = $3 AND user_id = $4
                "#,
            )
            .bind(age)
            .bind(&schedule_data)
            .bind(notification.sleep_schedule_id)
            .bind(auth.user_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        user_id = %auth.user_id,
        notification_id = %notification_id,
        approved = input.approved,
        "Notification decision recorded"
    );

    Ok(Json(notification))
}

/// DELETE /api/notifications/{id}
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification deleted", body = NotificationMutationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<NotificationMutationResponse>> {
    let result = sqlx::query("DELETE FROM schedule_notifications WHERE id = $1 AND user_id = $2")
        .bind(notification_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(notification_id));
    }

    Ok(Json(NotificationMutationResponse {
        success: true,
        message: Some("Notification deleted successfully".to_string()),
    }))
}

fn not_found(notification_id: Uuid) -> AppError {
    AppError::NotFound(format!("Notification {} not found", notification_id))
}
