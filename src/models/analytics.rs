use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySleepSummary {
    pub date: NaiveDate,
    pub total_sleep_minutes: i64,
    pub night_wakings: u32,
    /// HH:MM, earliest evening start of nighttime sleep
    pub bedtime: Option<String>,
    /// HH:MM, latest morning end of nighttime sleep
    pub wake_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyFeedingSummary {
    pub date: NaiveDate,
    pub frequency: u32,
    pub average_duration_minutes: f64,
    pub total_amount_ml: i64,
    pub average_amount_ml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SleepTrend {
    Neutral,
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpertTip {
    pub title: String,
    pub description: String,
    pub priority: TipPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsReport {
    pub days: i64,
    pub sleep: Vec<DailySleepSummary>,
    pub feeding: Vec<DailyFeedingSummary>,
    pub average_sleep_minutes: f64,
    pub average_night_wakings: f64,
    pub average_feedings_per_day: f64,
    pub trend: SleepTrend,
    pub tips: Vec<ExpertTip>,
}
