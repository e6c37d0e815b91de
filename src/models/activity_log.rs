use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ActivityType {
    Sleep,
    Feeding,
    Diaper,
    Custom,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Sleep => "sleep",
            ActivityType::Feeding => "feeding",
            ActivityType::Diaper => "diaper",
            ActivityType::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum SleepType {
    Nap,
    Nighttime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum FeedingType {
    Nursing,
    Formula,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum DiaperType {
    Wet,
    Dirty,
    Both,
}

/// A single sleep, feeding, diaper or custom event, one row of `activity_logs`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: ActivityType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes
    pub duration: Option<i32>,
    pub sleep_type: Option<SleepType>,
    pub sleep_location: Option<String>,
    pub feeding_type: Option<FeedingType>,
    /// Millilitres
    pub feeding_amount: Option<i32>,
    pub diaper_type: Option<DiaperType>,
    pub custom_activity_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityLog {
    /// Timestamp the event is filed under: when it started, or when it was logged
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.start_time.unwrap_or(self.created_at)
    }
}
