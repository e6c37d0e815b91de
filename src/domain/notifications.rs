//! Age-threshold check behind schedule update prompts.
//!
//! A schedule records the baby's age and when that age was set. Once enough
//! months have passed for the baby to move into the next age bracket, the user gets
//! one prompt per bracket offering the newer timetable.

use chrono::{DateTime, Datelike, Utc};
use serde_json::json;

use crate::{
    domain::recommendations::{recommendation_for_age, AgeBracket, MAX_BABY_AGE_MONTHS},
    models::{ScheduleNotification, SleepSchedule, AGE_UPDATE_NOTIFICATION},
};

#[derive(Debug, Clone, PartialEq)]
pub struct AgeUpdate {
    pub current_age_months: i32,
    pub message: String,
    pub suggested_changes: serde_json::Value,
}

/// Whole calendar months between two instants; never negative
pub fn months_elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> i32 {
    if to <= from {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}

/// Returns the prompt to create, if the baby has outgrown the schedule's
/// bracket and no prompt for the new bracket exists yet
pub fn check_age_threshold(
    schedule: &SleepSchedule,
    existing: &[ScheduleNotification],
    now: DateTime<Utc>,
) -> Option<AgeUpdate> {
    // Suggestions past the oldest bracket could never be approved
    let current_age = schedule
        .baby_age_months
        .saturating_add(months_elapsed(schedule.age_recorded_at, now))
        .min(MAX_BABY_AGE_MONTHS);
    let stored_bracket = AgeBracket::for_age(schedule.baby_age_months);
    let current_bracket = AgeBracket::for_age(current_age);

    if current_bracket == stored_bracket {
        return None;
    }

    let already_prompted = existing.iter().any(|n| {
        n.sleep_schedule_id == schedule.id
            && n.notification_type == AGE_UPDATE_NOTIFICATION
            && n.suggested_changes.get("age_range").and_then(|v| v.as_str())
                == Some(current_bracket.label())
    });
    if already_prompted {
        return None;
    }

    let recommendation = recommendation_for_age(current_age);
    let message = format!(
        "Your baby is now {} months old. A {} month schedule with {} and {} wake windows may suit them better.",
        current_age, recommendation.age_range, recommendation.nap_count, recommendation.wake_windows
    );

    Some(AgeUpdate {
        current_age_months: current_age,
        message,
        suggested_changes: json!({
            "baby_age_months": current_age,
            "age_range": current_bracket.label(),
            "recommendation": recommendation,
        }),
    })
}

/// Age carried by an approved suggestion, if any
pub fn suggested_age(changes: &serde_json::Value) -> Option<i32> {
    changes
        .get("baby_age_months")
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn schedule(age: i32, created_at: DateTime<Utc>) -> SleepSchedule {
        SleepSchedule {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            baby_age_months: age,
            current_bedtime: "19:30".to_string(),
            current_wake_time: "07:00".to_string(),
            nap_habits: "Two naps".to_string(),
            sleep_challenges: None,
            schedule_data: json!({}),
            is_active: true,
            age_recorded_at: created_at,
            created_at,
            updated_at: created_at,
        }
    }

    fn prompt_for(schedule: &SleepSchedule, age_range: &str) -> ScheduleNotification {
        ScheduleNotification {
            id: Uuid::new_v4(),
            user_id: schedule.user_id,
            sleep_schedule_id: schedule.id,
            notification_type: AGE_UPDATE_NOTIFICATION.to_string(),
            message: String::new(),
            suggested_changes: json!({ "age_range": age_range }),
            is_read: false,
            is_approved: None,
            created_at: schedule.created_at,
            updated_at: schedule.created_at,
        }
    }

    #[test]
    fn test_months_elapsed() {
        assert_eq!(months_elapsed(ts(2025, 1, 15), ts(2025, 1, 30)), 0);
        assert_eq!(months_elapsed(ts(2025, 1, 15), ts(2025, 2, 14)), 0);
        assert_eq!(months_elapsed(ts(2025, 1, 15), ts(2025, 2, 15)), 1);
        assert_eq!(months_elapsed(ts(2024, 11, 30), ts(2025, 3, 1)), 3);
        assert_eq!(months_elapsed(ts(2025, 3, 1), ts(2025, 1, 1)), 0);
    }

    #[test]
    fn test_no_prompt_within_same_bracket() {
        let s = schedule(7, ts(2025, 1, 1));
        assert!(check_age_threshold(&s, &[], ts(2025, 4, 1)).is_none());
    }

    #[test]
    fn test_prompt_when_bracket_is_crossed() {
        let s = schedule(4, ts(2025, 1, 10));
        let update = check_age_threshold(&s, &[], ts(2025, 3, 12)).unwrap();

        assert_eq!(update.current_age_months, 6);
        assert_eq!(update.suggested_changes["age_range"], "5-6");
        assert_eq!(update.suggested_changes["baby_age_months"], 6);
        assert_eq!(suggested_age(&update.suggested_changes), Some(6));
        assert!(update.message.contains("6 months old"));
    }

    #[test]
    fn test_prompt_is_not_repeated() {
        let s = schedule(4, ts(2025, 1, 10));
        let existing = vec![prompt_for(&s, "5-6")];
        assert!(check_age_threshold(&s, &existing, ts(2025, 3, 12)).is_none());

        // the next bracket gets its own prompt
        let update = check_age_threshold(&s, &existing, ts(2025, 5, 12)).unwrap();
        assert_eq!(update.suggested_changes["age_range"], "7-12");
    }

    #[test]
    fn test_suggested_age_requires_number() {
        assert_eq!(suggested_age(&json!({ "baby_age_months": "six" })), None);
        assert_eq!(suggested_age(&json!({})), None);
    }

    #[test]
    fn test_approved_age_is_not_counted_twice() {
        let mut s = schedule(4, ts(2025, 1, 10));
        let update = check_age_threshold(&s, &[], ts(2025, 3, 12)).unwrap();
        let existing = vec![prompt_for(&s, "5-6")];

        // approval stores the suggested age as of the decision time
        s.baby_age_months = suggested_age(&update.suggested_changes).unwrap();
        s.age_recorded_at = ts(2025, 3, 12);

        assert!(check_age_threshold(&s, &existing, ts(2025, 3, 12)).is_none());
        assert!(check_age_threshold(&s, &existing, ts(2025, 4, 11)).is_none());

        let next = check_age_threshold(&s, &existing, ts(2025, 4, 12)).unwrap();
        assert_eq!(next.current_age_months, 7);
        assert_eq!(next.suggested_changes["age_range"], "7-12");
    }

    #[test]
    fn test_suggested_age_never_exceeds_oldest_bracket() {
        let s = schedule(12, ts(2023, 1, 1));
        let update = check_age_threshold(&s, &[], ts(2025, 6, 1)).unwrap();

        assert_eq!(update.current_age_months, MAX_BABY_AGE_MONTHS);
        assert_eq!(suggested_age(&update.suggested_changes), Some(MAX_BABY_AGE_MONTHS));
        assert!(crate::domain::recommendations::schedule_data_for_age(MAX_BABY_AGE_MONTHS).is_ok());

        let oldest = schedule(MAX_BABY_AGE_MONTHS, ts(2023, 1, 1));
        assert!(check_age_threshold(&oldest, &[], ts(2025, 6, 1)).is_none());
    }
}
