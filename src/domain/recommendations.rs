//! Age-appropriate wake windows and daily timetables.

use crate::{
    models::{ScheduleItem, SleepRecommendation},
    AppError, AppResult,
};

pub const MAX_BABY_AGE_MONTHS: i32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Newborn,
    ThreeToFour,
    FiveToSix,
    SevenToTwelve,
    Toddler,
}

impl AgeBracket {
    pub fn for_age(months: i32) -> Self {
        match months {
            m if m <= 2 => AgeBracket::Newborn,
            m if m <= 4 => AgeBracket::ThreeToFour,
            m if m <= 6 => AgeBracket::FiveToSix,
            m if m <= 12 => AgeBracket::SevenToTwelve,
            _ => AgeBracket::Toddler,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Newborn => "0-2",
            AgeBracket::ThreeToFour => "3-4",
            AgeBracket::FiveToSix => "5-6",
            AgeBracket::SevenToTwelve => "7-12",
            AgeBracket::Toddler => "13-18",
        }
    }
}

const GETTING_STARTED_TIPS: [&str; 4] = [
    "Gradual Implementation: Adjust your current routine slowly, moving bedtime by 15 minutes every few days.",
    "Watch Wake Windows: Put baby down for sleep before they become overtired to ensure easier settling.",
    "Consistency: Try to maintain the same routine every day, even on weekends.",
    "Environment: Keep the sleep environment dark, cool, and quiet for optimal rest.",
];

const NEWBORN_PLAN: &[(&str, &str)] = &[
    ("7:00 AM", "Wake up & feed"),
    ("8:00 AM", "Nap 1 (30-45 min)"),
    ("9:30 AM", "Feed & play"),
    ("10:30 AM", "Nap 2 (45-60 min)"),
    ("12:00 PM", "Feed & play"),
    ("1:00 PM", "Nap 3 (60-90 min)"),
    ("3:00 PM", "Feed & play"),
    ("4:00 PM", "Nap 4 (30-45 min)"),
    ("5:30 PM", "Feed & bath routine"),
    ("7:00 PM", "Final feed & bedtime"),
];

const THREE_TO_FOUR_PLAN: &[(&str, &str)] = &[
    ("7:00 AM", "Wake up & feed"),
    ("8:15 AM", "Nap 1 (45-60 min)"),
    ("10:00 AM", "Feed & play"),
    ("11:30 AM", "Nap 2 (60-90 min)"),
    ("1:30 PM", "Feed & play"),
    ("3:00 PM", "Nap 3 (45-60 min)"),
    ("4:30 PM", "Feed & play"),
    ("6:00 PM", "Short catnap (20-30 min)"),
    ("7:00 PM", "Bath & bedtime routine"),
    ("7:30 PM", "Final feed & sleep"),
];

const FIVE_TO_SIX_PLAN: &[(&str, &str)] = &[
    ("7:00 AM", "Wake up & feed"),
    ("9:00 AM", "Nap 1 (60-90 min)"),
    ("11:00 AM", "Feed & play"),
    ("1:00 PM", "Nap 2 (60-90 min)"),
    ("3:00 PM", "Feed & play"),
    ("5:00 PM", "Nap 3 (30-45 min)"),
    ("6:30 PM", "Bath & dinner"),
    ("7:30 PM", "Bedtime routine & sleep"),
];

const SEVEN_TO_TWELVE_PLAN: &[(&str, &str)] = &[
    ("7:00 AM", "Wake up & breakfast"),
    ("10:00 AM", "Morning nap (60-90 min)"),
    ("12:00 PM", "Lunch & play"),
    ("2:30 PM", "Afternoon nap (60-90 min)"),
    ("4:30 PM", "Snack & play"),
    ("6:30 PM", "Dinner & bath"),
    ("7:30 PM", "Bedtime routine & sleep"),
];

const TODDLER_PLAN: &[(&str, &str)] = &[
    ("7:00 AM", "Wake up & breakfast"),
    ("12:00 PM", "Lunch"),
    ("1:00 PM", "Afternoon nap (90-120 min)"),
    ("3:30 PM", "Snack & play"),
    ("6:00 PM", "Dinner"),
    ("7:00 PM", "Bath & bedtime routine"),
    ("7:30 PM", "Bedtime"),
];

pub fn recommendation_for_age(months: i32) -> SleepRecommendation {
    let bracket = AgeBracket::for_age(months);

    let (total_sleep, nap_count, wake_windows, plan) = match bracket {
        AgeBracket::Newborn => ("14-17 hours", "6-8 short naps", "45-60 minutes", NEWBORN_PLAN),
        AgeBracket::ThreeToFour => ("12-15 hours", "4-5 naps", "1-1.5 hours", THREE_TO_FOUR_PLAN),
        AgeBracket::FiveToSix => ("12-14 hours", "3-4 naps", "1.5-2.5 hours", FIVE_TO_SIX_PLAN),
        AgeBracket::SevenToTwelve => ("12-14 hours", "2 naps", "2.5-3.5 hours", SEVEN_TO_TWELVE_PLAN),
        AgeBracket::Toddler => ("11-14 hours", "1 nap", "4-6 hours", TODDLER_PLAN),
    };

    SleepRecommendation {
        age_range: bracket.label().to_string(),
        total_sleep: total_sleep.to_string(),
        nap_count: nap_count.to_string(),
        wake_windows: wake_windows.to_string(),
        schedule: plan
            .iter()
            .map(|(time, activity)| ScheduleItem {
                time: time.to_string(),
                activity: activity.to_string(),
            })
            .collect(),
        tips: GETTING_STARTED_TIPS.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn check_age(months: i32) -> AppResult<()> {
    if !(0..=MAX_BABY_AGE_MONTHS).contains(&months) {
        return Err(AppError::Validation(format!(
            "baby_age_months must be between 0 and {}",
            MAX_BABY_AGE_MONTHS
        )));
    }
    Ok(())
}

/// Recommendation for `months` in the shape stored as `schedule_data`
pub fn schedule_data_for_age(months: i32) -> AppResult<serde_json::Value> {
    check_age(months)?;
    serde_json::to_value(recommendation_for_age(months))
        .map_err(|e| AppError::Internal(format!("Failed to encode schedule: {}", e)))
}
