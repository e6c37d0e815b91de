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
    domain::activity::{apply_update, validate_new_log},
    extractors::AuthenticatedUser,
    models::{
        ActivityLog, ActivityLogMutationResponse, ActivityType, CreateActivityLogInput,
        UpdateActivityLogInput,
    },
    AppError, AppResult, AppState,
};

const DEFAULT_LIST_LIMIT: i64 = 200;
const MAX_LIST_LIMIT: i64 = 1000;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListActivityLogsQuery {
    /// Only logs of this type
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
    /// Logged at or after (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Logged before (RFC 3339)
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// GET /api/activity-logs?type=&from=&to=&limit=
#[utoipa::path(
    get,
    path = "/api/activity-logs",
    params(ListActivityLogsQuery),
    responses(
        (status = 200, description = "Activity logs, newest first", body = Vec<ActivityLog>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activity-logs",
    security(("bearer_auth" = []))
)]
pub async fn list_activity_logs(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<ListActivityLogsQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    let limit = resolve_limit(&query)?;
    let (sql, filters) = list_sql(&query);

    let mut db_query = sqlx::query_as::<_, ActivityLog>(&sql).bind(auth.user_id);
    for filter in filters {
        db_query = match filter {
            FilterValue::ActivityType(activity_type) => db_query.bind(activity_type),
            FilterValue::Time(at) => db_query.bind(at),
        };
    }
    db_query = db_query.bind(limit);

    let logs = db_query.fetch_all(&state.db).await?;

    Ok(Json(logs))
}

/// GET /api/activity-logs/{id}
#[utoipa::path(
    get,
    path = "/api/activity-logs/{id}",
    params(
        ("id" = Uuid, Path, description = "Activity log ID")
    ),
    responses(
        (status = 200, description = "Activity log", body = ActivityLog),
        (status = 404, description = "Activity log not found")
    ),
    tag = "activity-logs",
    security(("bearer_auth" = []))
)]
pub async fn get_activity_log(
    State(state): State<Arc<AppState>>,
    Path(log_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<ActivityLog>> {
    let log = fetch_owned_log(&state.db, log_id, auth.user_id).await?;
    Ok(Json(log))
}

/// POST /api/activity-logs - Log a new activity
#[utoipa::path(
    post,
    path = "/api/activity-logs",
    request_body = CreateActivityLogInput,
    responses(
        (status = 200, description = "Activity logged", body = ActivityLog),
        (status = 422, description = "Missing or inconsistent fields for the activity type")
    ),
    tag = "activity-logs",
    security(("bearer_auth" = []))
)]
pub async fn create_activity_log(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<CreateActivityLogInput>,
) -> AppResult<Json<ActivityLog>> {
    let duration = validate_new_log(&input)?;

    let log = sqlx::query_as::<_, ActivityLog>(
        r#"
        INSERT INTO activity_logs (
            user_id, activity_type, start_time, end_time, duration,
            sleep_type, sleep_location, feeding_type, feeding_amount,
            diaper_type, custom_activity_name, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(input.activity_type)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(duration)
    .bind(input.sleep_type)
    .bind(&input.sleep_location)
    .bind(input.feeding_type)
    .bind(input.feeding_amount)
    .bind(input.diaper_type)
    .bind(&input.custom_activity_name)
    .bind(&input.notes)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        log_id = %log.id,
        activity_type = log.activity_type.as_str(),
        "Activity logged"
    );

    Ok(Json(log))
}

/// PUT /api/activity-logs/{id} - Edit an activity log
#[utoipa::path(
    put,
    path = "/api/activity-logs/{id}",
    params(
        ("id" = Uuid, Path, description = "Activity log ID")
    ),
    request_body = UpdateActivityLogInput,
    responses(
        (status = 200, description = "Activity log updated", body = ActivityLog),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Activity log not found"),
        (status = 422, description = "Invalid field values")
    ),
    tag = "activity-logs",
    security(("bearer_auth" = []))
)]
pub async fn update_activity_log(
    State(state): State<Arc<AppState>>,
    Path(log_id): Path<Uuid>,
    auth: AuthenticatedUser,
    Json(input): Json<UpdateActivityLogInput>,
) -> AppResult<Json<ActivityLog>> {
    let existing = fetch_owned_log(&state.db, log_id, auth.user_id).await?;
    let merged = apply_update(&existing, &input)?;

    let updated = sqlx::query_as::<_, ActivityLog>(
        r#"
        UPDATE activity_logs
        SET start_time = $1,
            end_time = $2,
            duration = $3,
            sleep_type = $4,
            sleep_location = $5,
            feeding_type = $6,
            feeding_amount = $7,
            diaper_type = $8,
            custom_activity_name = $9,
            notes = $10,
            updated_at = now()
        WHERE id = $11 AND user_id = $12
        RETURNING *
        "#,
    )
    .bind(merged.start_time)
    .bind(merged.end_time)
    .bind(merged.duration)
    .bind(merged.sleep_type)
    .bind(&merged.sleep_location)
    .bind(merged.feeding_type)
    .bind(merged.feeding_amount)
    .bind(merged.diaper_type)
    .bind(&merged.custom_activity_name)
    .bind(&merged.notes)
    .bind(log_id)
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Activity log {} not found", log_id)))?;

    Ok(Json(updated))
}

/// DELETE /api/activity-logs/{id}
#[utoipa::path(
    delete,
    path = "/api/activity-logs/{id}",
    params(
        ("id" = Uuid, Path, description = "Activity log ID")
    ),
    responses(
        (status = 200, description = "Activity log deleted", body = ActivityLogMutationResponse),
        (status = 404, description = "Activity log not found")
    ),
    tag = "activity-logs",
    security(("bearer_auth" = []))
)]
pub async fn delete_activity_log(
    State(state): State<Arc<AppState>>,
    Path(log_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<ActivityLogMutationResponse>> {
    let result = sqlx::query(DELETE_LOG_SQL)
        .bind(log_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    ensure_deleted(result.rows_affected(), log_id)?;

    tracing::info!(user_id = %auth.user_id, log_id = %log_id, "Activity log deleted");

    Ok(Json(ActivityLogMutationResponse {
        success: true,
        message: Some("Activity log deleted successfully".to_string()),
    }))
}

async fn fetch_owned_log(db: &sqlx::PgPool, log_id: Uuid, user_id: Uuid) -> AppResult<ActivityLog> {
    sqlx::query_as::<_, ActivityLog>("SELECT * FROM activity_logs WHERE id = $1 AND user_id = $2")
        .bind(log_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity log {} not found", log_id)))
}

/// Values bound after `user_id`, in placeholder order
#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    ActivityType(ActivityType),
    Time(DateTime<Utc>),
}

fn resolve_limit(query: &ListActivityLogsQuery) -> AppResult<i64> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_LIST_LIMIT
        )));
    }
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest("from must not be after to".to_string()));
        }
    }
    Ok(limit)
}

/// `$1` is always the caller's id and the last placeholder is the limit
fn list_sql(query: &ListActivityLogsQuery) -> (String, Vec<FilterValue>) {
    let mut sql = "SELECT * FROM activity_logs WHERE user_id = $1".to_string();
    let mut filters = Vec::new();
    let mut bind_count = 2;

    if let Some(activity_type) = query.activity_type {
        sql.push_str(&format!(" AND activity_type = ${}", bind_count));
        filters.push(FilterValue::ActivityType(activity_type));
        bind_count += 1;
    }
    if let Some(from) = query.from {
        sql.push_str(&format!(" AND created_at >= ${}", bind_count));
        filters.push(FilterValue::Time(from));
        bind_count += 1;
    }
    if let Some(to) = query.to {
        sql.push_str(&format!(" AND created_at < ${}", bind_count));
        filters.push(FilterValue::Time(to));
        bind_count += 1;
    }
    sql.push_str(&format!(" ORDER BY created_at DESC LIMIT ${}", bind_count));

    (sql, filters)
}

const DELETE_LOG_SQL: &str = "DELETE FROM activity_logs WHERE id = $1 AND user_id = $2";

fn ensure_deleted(rows_affected: u64, log_id: Uuid) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Activity log {} not found", log_id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_list_sql_without_filters() {
        let (sql, filters) = list_sql(&ListActivityLogsQuery::default());
        assert_eq!(
            sql,
            "SELECT * FROM activity_logs WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        assert!(filters.is_empty());
    }

    #[test]
    fn test_list_sql_placeholders_follow_filters() {
        let cases = [
            (Some(ActivityType::Sleep), None, None,
                " AND activity_type = $2 ORDER BY created_at DESC LIMIT $3",
                vec![FilterValue::ActivityType(ActivityType::Sleep)]),
            (None, Some(at(1)), None,
                " AND created_at >= $2 ORDER BY created_at DESC LIMIT $3",
                vec![FilterValue::Time(at(1))]),
            (None, None, Some(at(9)),
                " AND created_at < $2 ORDER BY created_at DESC LIMIT $3",
                vec![FilterValue::Time(at(9))]),
            (Some(ActivityType::Feeding), Some(at(1)), None,
                " AND activity_type = $2 AND created_at >= $3 ORDER BY created_at DESC LIMIT $4",
                vec![FilterValue::ActivityType(ActivityType::Feeding), FilterValue::Time(at(1))]),
            (Some(ActivityType::Diaper), None, Some(at(9)),
                " AND activity_type = $2 AND created_at < $3 ORDER BY created_at DESC LIMIT $4",
                vec![FilterValue::ActivityType(ActivityType::Diaper), FilterValue::Time(at(9))]),
            (None, Some(at(1)), Some(at(9)),
                " AND created_at >= $2 AND created_at < $3 ORDER BY created_at DESC LIMIT $4",
                vec![FilterValue::Time(at(1)), FilterValue::Time(at(9))]),
            (Some(ActivityType::Custom), Some(at(1)), Some(at(9)),
                " AND activity_type = $2 AND created_at >= $3 AND created_at < $4 ORDER BY created_at DESC LIMIT $5",
                vec![
                    FilterValue::ActivityType(ActivityType::Custom),
                    FilterValue::Time(at(1)),
                    FilterValue::Time(at(9)),
                ]),
        ];

        for (activity_type, from, to, tail, expected) in cases {
            let query = ListActivityLogsQuery {
                activity_type,
                from,
                to,
                limit: None,
            };
            let (sql, filters) = list_sql(&query);
            assert_eq!(sql, format!("SELECT * FROM activity_logs WHERE user_id = $1{}", tail));
            assert_eq!(filters, expected);
        }
    }

    #[test]
    fn test_limit_and_range_checks() {
        assert_eq!(resolve_limit(&ListActivityLogsQuery::default()).unwrap(), DEFAULT_LIST_LIMIT);

        for limit in [0, MAX_LIST_LIMIT + 1] {
            let query = ListActivityLogsQuery {
                limit: Some(limit),
                ..Default::default()
            };
            assert!(matches!(resolve_limit(&query), Err(AppError::BadRequest(_))));
        }

        let reversed = ListActivityLogsQuery {
            from: Some(at(9)),
            to: Some(at(1)),
            ..Default::default()
        };
        assert!(matches!(resolve_limit(&reversed), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_delete_is_scoped_to_one_owned_record() {
        assert_eq!(DELETE_LOG_SQL, "DELETE FROM activity_logs WHERE id = $1 AND user_id = $2");

        let log_id = Uuid::new_v4();
        assert!(ensure_deleted(1, log_id).is_ok());
        assert!(matches!(ensure_deleted(0, log_id), Err(AppError::NotFound(_))));
    }
}
