use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SleepSchedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub baby_age_months: i32,
    pub current_bedtime: String,
    pub current_wake_time: String,
    pub nap_habits: String,
    pub sleep_challenges: Option<String>,
    /// Recommended timetable generated for `baby_age_months`
    #[schema(value_type = Object)]
    pub schedule_data: serde_json::Value,
    pub is_active: bool,
    /// When `baby_age_months` was last set; the baby's age is counted from here
    pub age_recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleItem {
    pub time: String,
    pub activity: String,
}

/// Age-appropriate daily plan for one age bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SleepRecommendation {
    pub age_range: String,
    pub total_sleep: String,
    pub nap_count: String,
    pub wake_windows: String,
    pub schedule: Vec<ScheduleItem>,
    pub tips: Vec<String>,
}
