use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    domain::{
        notifications::check_age_threshold,
        recommendations::{check_age, recommendation_for_age, schedule_data_for_age},
    },
    extractors::AuthenticatedUser,
    models::{
        CreateSleepScheduleInput, ScheduleMutationResponse, ScheduleNotification, SleepRecommendation,
        SleepSchedule, UpdateSleepScheduleInput, AGE_UPDATE_NOTIFICATION,
    },
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecommendationQuery {
    /// Baby's age in whole months (0-36)
    pub age_months: i32,
}

/// GET /api/sleep-schedules/recommendation?age_months=
#[utoipa::path(
    get,
    path = "/api/sleep-schedules/recommendation",
    params(RecommendationQuery),
    responses(
        (status = 200, description = "Age-appropriate schedule", body = SleepRecommendation),
        (status = 422, description = "Age out of range")
    ),
    tag = "sleep-schedules"
)]
pub async fn get_recommendation(
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<SleepRecommendation>> {
    check_age(query.age_months)?;
    Ok(Json(recommendation_for_age(query.age_months)))
}

/// GET /api/sleep-schedules
#[utoipa::path(
    get,
    path = "/api/sleep-schedules",
    responses(
        (status = 200, description = "Caller's sleep schedules, newest first", body = Vec<SleepSchedule>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<Json<Vec<SleepSchedule>>> {
    let schedules = sqlx::query_as::<_, SleepSchedule>(
        "SELECT * FROM sleep_schedules WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(schedules))
}

/// GET /api/sleep-schedules/active
///
/// Also checks whether the baby has outgrown the schedule's age bracket and,
/// if so, queues an `age_update` notification.
#[utoipa::path(
    get,
    path = "/api/sleep-schedules/active",
    responses(
        (status = 200, description = "The active sleep schedule", body = SleepSchedule),
        (status = 404, description = "No active schedule")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn get_active_schedule(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<Json<SleepSchedule>> {
    let schedule = sqlx::query_as::<_, SleepSchedule>(
        r#"
        SELECT * FROM sleep_schedules
        WHERE user_id = $1 AND is_active = true
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("No active sleep schedule".to_string()))?;

    if let Err(e) = queue_age_update(&state.db, &schedule).await {
        tracing::warn!(error = %e, schedule_id = %schedule.id, "Age threshold check failed");
    }

    Ok(Json(schedule))
}

/// GET /api/sleep-schedules/{id}
#[utoipa::path(
    get,
    path = "/api/sleep-schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Sleep schedule ID")
    ),
    responses(
        (status = 200, description = "Sleep schedule", body = SleepSchedule),
        (status = 404, description = "Sleep schedule not found")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<SleepSchedule>> {
    let schedule = fetch_owned_schedule(&state.db, schedule_id, auth.user_id).await?;
    Ok(Json(schedule))
}

/// POST /api/sleep-schedules - Save a questionnaire and its generated schedule
#[utoipa::path(
    post,
    path = "/api/sleep-schedules",
    request_body = CreateSleepScheduleInput,
    responses(
        (status = 200, description = "Sleep schedule created", body = SleepSchedule),
        (status = 422, description = "Missing answers or age out of range")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<CreateSleepScheduleInput>,
) -> AppResult<Json<SleepSchedule>> {
    validate_new_schedule(&input)?;
    let schedule_data = schedule_data_for_age(input.baby_age_months)?;
    let is_active = input.is_active.unwrap_or(true);

    let mut tx = state.db.begin().await?;

    let schedule = sqlx::query_as::<_, SleepSchedule>(
        r#"
        INSERT INTO sleep_schedules (
            user_id, baby_age_months, current_bedtime, current_wake_time,
            nap_habits, sleep_challenges, schedule_data, is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(input.baby_age_months)
    .bind(input.current_bedtime.trim())
    .bind(input.current_wake_time.trim())
    .bind(input.nap_habits.trim())
    .bind(&input.sleep_challenges)
    .bind(&schedule_data)
    .bind(is_active)
    .fetch_one(&mut *tx)
    .await?;

    if is_active {
        deactivate_others(&mut tx, auth.user_id, schedule.id).await?;
    }

    tx.commit().await?;

    tracing::info!(
        user_id = %auth.user_id,
        schedule_id = %schedule.id,
        baby_age_months = schedule.baby_age_months,
        "Sleep schedule created"
    );

    Ok(Json(schedule))
}

/// PUT /api/sleep-schedules/{id}
#[utoipa::path(
    put,
    path = "/api/sleep-schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Sleep schedule ID")
    ),
    request_body = UpdateSleepScheduleInput,
    responses(
        (status = 200, description = "Sleep schedule updated", body = SleepSchedule),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Sleep schedule not found"),
        (status = 422, description = "Invalid field values")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<Uuid>,
    auth: AuthenticatedUser,
    Json(input): Json<UpdateSleepScheduleInput>,
) -> AppResult<Json<SleepSchedule>> {
    let existing = fetch_owned_schedule(&state.db, schedule_id, auth.user_id).await?;
    let merged = merge_schedule_update(existing, &input, Utc::now())?;

    let updated = sqlx::query_as::<_, SleepSchedule>(
        r#"
        UPDATE sleep_schedules
        SET baby_age_months = $1,
            current_bedtime = $2,
            current_wake_time = $3,
            nap_habits = $4,
            sleep_challenges = $5,
            schedule_data = $6,
            age_recorded_at = $7,
            updated_at = now()
        WHERE id = $8 AND user_id = $9
        RETURNING *
        "#,
    )
    .bind(merged.baby_age_months)
    .bind(&merged.current_bedtime)
    .bind(&merged.current_wake_time)
    .bind(&merged.nap_habits)
    .bind(&merged.sleep_challenges)
    .bind(&merged.schedule_data)
    .bind(merged.age_recorded_at)
    .bind(schedule_id)
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Sleep schedule {} not found", schedule_id)))?;

    Ok(Json(updated))
}

/// POST /api/sleep-schedules/{id}/activate - Make this the caller's only active schedule
#[utoipa::path(
    post,
    path = "/api/sleep-schedules/{id}/activate",
    params(
        ("id" = Uuid, Path, description = "Sleep schedule ID")
    ),
    responses(
        (status = 200, description = "Sleep schedule activated", body = SleepSchedule),
        (status = 404, description = "Sleep schedule not found")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn activate_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<SleepSchedule>> {
    let mut tx = state.db.begin().await?;

    let schedule = sqlx::query_as::<_, SleepSchedule>(
        r#"
        UPDATE sleep_schedules
        SET is_active = true, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(schedule_id)
    .bind(auth.user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Sleep schedule {} not found", schedule_id)))?;

    deactivate_others(&mut tx, auth.user_id, schedule.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = %auth.user_id, schedule_id = %schedule.id, "Sleep schedule activated");

    Ok(Json(schedule))
}

/// DELETE /api/sleep-schedules/{id}
#[utoipa::path(
    delete,
    path = "/api/sleep-schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Sleep schedule ID")
    ),
    responses(
        (status = 200, description = "Sleep schedule deleted", body = ScheduleMutationResponse),
        (status = 404, description = "Sleep schedule not found")
    ),
    tag = "sleep-schedules",
    security(("bearer_auth" = []))
)]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<ScheduleMutationResponse>> {
    // Notifications go with it (ON DELETE CASCADE)
    let result = sqlx::query("DELETE FROM sleep_schedules WHERE id = $1 AND user_id = $2")
        .bind(schedule_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Sleep schedule {} not found",
            schedule_id
        )));
    }

    Ok(Json(ScheduleMutationResponse {
        success: true,
        message: Some("Sleep schedule deleted successfully".to_string()),
    }))
}

async fn fetch_owned_schedule(db: &sqlx::PgPool, schedule_id: Uuid, user_id: Uuid) -> AppResult<SleepSchedule> {
    sqlx::query_as::<_, SleepSchedule>("SELECT * FROM sleep_schedules WHERE id = $1 AND user_id = $2")
        .bind(schedule_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Sleep schedule {} not found", schedule_id)))
}

async fn deactivate_others(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    keep_id: Uuid,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE sleep_schedules
        SET is_active = false, updated_at = now()
        WHERE user_id = $1 AND id <> $2 AND is_active = true
        "#,
    )
    .bind(user_id)
    .bind(keep_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

const INSERT_AGE_UPDATE_SQL: &str = r#"
    INSERT INTO schedule_notifications (
        user_id, sleep_schedule_id, notification_type, message, suggested_changes
    )
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT DO NOTHING
"#;

async fn queue_age_update(db: &sqlx::PgPool, schedule: &SleepSchedule) -> AppResult<()> {
    let existing = sqlx::query_as::<_, ScheduleNotification>(
        r#"
        SELECT * FROM schedule_notifications
        WHERE sleep_schedule_id = $1 AND user_id = $2 AND notification_type = $3
        "#,
    )
    .bind(schedule.id)
    .bind(schedule.user_id)
    .bind(AGE_UPDATE_NOTIFICATION)
    .fetch_all(db)
    .await?;

    let Some(update) = check_age_threshold(schedule, &existing, Utc::now()) else {
        return Ok(());
    };

    // A concurrent read may have queued the same prompt first
    let inserted = sqlx::query(INSERT_AGE_UPDATE_SQL)
        .bind(schedule.user_id)
        .bind(schedule.id)
        .bind(AGE_UPDATE_NOTIFICATION)
        .bind(&update.message)
        .bind(&update.suggested_changes)
        .execute(db)
        .await?
        .rows_affected();

    if inserted == 0 {
        return Ok(());
    }

    tracing::info!(
        schedule_id = %schedule.id,
        current_age_months = update.current_age_months,
        "Queued age update notification"
    );

    Ok(())
}

fn require_answer(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_new_schedule(input: &CreateSleepScheduleInput) -> AppResult<()> {
    check_age(input.baby_age_months)?;
    require_answer("current_bedtime", &input.current_bedtime)?;
    require_answer("current_wake_time", &input.current_wake_time)?;
    require_answer("nap_habits", &input.nap_habits)?;
    Ok(())
}

fn merge_schedule_update(
    mut schedule: SleepSchedule,
    input: &UpdateSleepScheduleInput,
    now: DateTime<Utc>,
) -> AppResult<SleepSchedule> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    if let Some(age) = input.baby_age_months {
        schedule.schedule_data = schedule_data_for_age(age)?;
        schedule.baby_age_months = age;
        schedule.age_recorded_at = now;
    }
    if let Some(bedtime) = &input.current_bedtime {
        require_answer("current_bedtime", bedtime)?;
        schedule.current_bedtime = bedtime.trim().to_string();
    }
    if let Some(wake_time) = &input.current_wake_time {
        require_answer("current_wake_time", wake_time)?;
        schedule.current_wake_time = wake_time.trim().to_string();
    }
    if let Some(nap_habits) = &input.nap_habits {
        require_answer("nap_habits", nap_habits)?;
        schedule.nap_habits = nap_habits.trim().to_string();
    }
    if let Some(challenges) = &input.sleep_challenges {
        schedule.sleep_challenges = Some(challenges.clone());
    }

    Ok(schedule)
}
