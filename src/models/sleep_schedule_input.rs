use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input for creating a sleep schedule from the bedtime routine questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSleepScheduleInput {
    pub baby_age_months: i32,
    pub current_bedtime: String,
    pub current_wake_time: String,
    pub nap_habits: String,
    pub sleep_challenges: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSleepScheduleInput {
    pub baby_age_months: Option<i32>,
    pub current_bedtime: Option<String>,
    pub current_wake_time: Option<String>,
    pub nap_habits: Option<String>,
    pub sleep_challenges: Option<String>,
}

impl UpdateSleepScheduleInput {
    pub fn is_empty(&self) -> bool {
        self.baby_age_months.is_none()
            && self.current_bedtime.is_none()
            && self.current_wake_time.is_none()
            && self.nap_habits.is_none()
            && self.sleep_challenges.is_none()
    }
}

/// Response for sleep schedule mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
