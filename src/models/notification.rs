use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const AGE_UPDATE_NOTIFICATION: &str = "age_update";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sleep_schedule_id: Uuid,
    pub notification_type: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub suggested_changes: serde_json::Value,
    pub is_read: bool,
    pub is_approved: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Approve or dismiss a suggested schedule change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDecisionInput {
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
