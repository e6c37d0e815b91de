use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::activity_log::{ActivityType, DiaperType, FeedingType, SleepType};

/// Input for logging a new activity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateActivityLogInput {
    pub activity_type: ActivityType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes. Derived from start/end for sleep logs.
    pub duration: Option<i32>,
    pub sleep_type: Option<SleepType>,
    pub sleep_location: Option<String>,
    pub feeding_type: Option<FeedingType>,
    pub feeding_amount: Option<i32>,
    pub diaper_type: Option<DiaperType>,
    pub custom_activity_name: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing an activity log; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateActivityLogInput {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub sleep_type: Option<SleepType>,
    pub sleep_location: Option<String>,
    pub feeding_type: Option<FeedingType>,
    pub feeding_amount: Option<i32>,
    pub diaper_type: Option<DiaperType>,
    pub custom_activity_name: Option<String>,
    pub notes: Option<String>,
}

impl UpdateActivityLogInput {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.end_time.is_none()
            && self.duration.is_none()
            && self.sleep_type.is_none()
            && self.sleep_location.is_none()
            && self.feeding_type.is_none()
            && self.feeding_amount.is_none()
            && self.diaper_type.is_none()
            && self.custom_activity_name.is_none()
            && self.notes.is_none()
    }
}

/// Response for activity log mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
