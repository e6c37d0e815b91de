//! Field rules for activity logs.
//!
//! Each activity type has one field the log is meaningless without; sleep
//! logs additionally derive their duration from the start/end pair.

use chrono::{DateTime, Utc};

use crate::{
    models::{ActivityLog, ActivityType, CreateActivityLogInput, UpdateActivityLogInput},
    AppError, AppResult,
};

/// Whole minutes between two instants, rounded half away from zero
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds() as f64;
    (millis / 60_000.0).round() as i64
}

/// Duration of a sleep stretch in minutes; the end must come after the start
pub fn sleep_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<i32> {
    if end <= start {
        return Err(AppError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    i32::try_from(minutes_between(start, end))
        .map_err(|_| AppError::Validation("Sleep duration is out of range".to_string()))
}

/// Checks a new log and returns the duration that should be stored with it
pub fn validate_new_log(input: &CreateActivityLogInput) -> AppResult<Option<i32>> {
    check_non_negative("duration", input.duration)?;
    check_non_negative("feeding_amount", input.feeding_amount)?;

    match input.activity_type {
        ActivityType::Sleep => {
            let start = input.start_time.ok_or_else(|| {
                AppError::Validation("start_time is required for sleep tracking".to_string())
            })?;
            match input.end_time {
                Some(end) => Ok(Some(sleep_duration(start, end)?)),
                None => Ok(input.duration),
            }
        }
        ActivityType::Feeding => {
            if input.feeding_type.is_none() {
                return Err(AppError::Validation(
                    "feeding_type is required for feeding logs".to_string(),
                ));
            }
            Ok(input.duration)
        }
        ActivityType::Diaper => {
            if input.diaper_type.is_none() {
                return Err(AppError::Validation(
                    "diaper_type is required for diaper logs".to_string(),
                ));
            }
            Ok(input.duration)
        }
        ActivityType::Custom => {
            let has_name = input
                .custom_activity_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty());
            if !has_name {
                return Err(AppError::Validation(
                    "custom_activity_name is required for custom activities".to_string(),
                ));
            }
            Ok(input.duration)
        }
    }
}

/// Merges an edit into an existing log, re-deriving the sleep duration when
/// either end of the stretch moved
pub fn apply_update(existing: &ActivityLog, input: &UpdateActivityLogInput) -> AppResult<ActivityLog> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    check_non_negative("duration", input.duration)?;
    check_non_negative("feeding_amount", input.feeding_amount)?;

    let mut updated = existing.clone();

    if let Some(start) = input.start_time {
        updated.start_time = Some(start);
    }
    if let Some(end) = input.end_time {
        updated.end_time = Some(end);
    }
    if let Some(duration) = input.duration {
        updated.duration = Some(duration);
    }
    if let Some(sleep_type) = input.sleep_type {
        updated.sleep_type = Some(sleep_type);
    }
    if let Some(location) = &input.sleep_location {
        updated.sleep_location = Some(location.clone());
    }
    if let Some(feeding_type) = input.feeding_type {
        updated.feeding_type = Some(feeding_type);
    }
    if let Some(amount) = input.feeding_amount {
        updated.feeding_amount = Some(amount);
    }
    if let Some(diaper_type) = input.diaper_type {
        updated.diaper_type = Some(diaper_type);
    }
    if let Some(name) = &input.custom_activity_name {
        if updated.activity_type == ActivityType::Custom && name.trim().is_empty() {
            return Err(AppError::Validation(
                "custom_activity_name cannot be empty".to_string(),
            ));
        }
        updated.custom_activity_name = Some(name.clone());
    }
    if let Some(notes) = &input.notes {
        updated.notes = Some(notes.clone());
    }

    let times_changed = input.start_time.is_some() || input.end_time.is_some();
    if updated.activity_type == ActivityType::Sleep && times_changed {
        if let (Some(start), Some(end)) = (updated.start_time, updated.end_time) {
            updated.duration = Some(sleep_duration(start, end)?);
        }
    }

    Ok(updated)
}

fn check_non_negative(field: &str, value: Option<i32>) -> AppResult<()> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!("{} cannot be negative", field))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiaperType, FeedingType, SleepType};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    fn new_input(activity_type: ActivityType) -> CreateActivityLogInput {
        CreateActivityLogInput {
            activity_type,
            start_time: None,
            end_time: None,
            duration: None,
            sleep_type: None,
            sleep_location: None,
            feeding_type: None,
            feeding_amount: None,
            diaper_type: None,
            custom_activity_name: None,
            notes: None,
        }
    }

    fn existing_sleep() -> ActivityLog {
        ActivityLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            activity_type: ActivityType::Sleep,
            start_time: Some(at(13, 0, 0)),
            end_time: Some(at(14, 0, 0)),
            duration: Some(60),
            sleep_type: Some(SleepType::Nap),
            sleep_location: Some("crib".to_string()),
            feeding_type: None,
            feeding_amount: None,
            diaper_type: None,
            custom_activity_name: None,
            notes: None,
            created_at: at(14, 1, 0),
            updated_at: at(14, 1, 0),
        }
    }

    #[test]
    fn test_minutes_between_rounds_to_nearest_minute() {
        assert_eq!(minutes_between(at(13, 0, 0), at(14, 30, 0)), 90);
        assert_eq!(minutes_between(at(13, 0, 0), at(13, 10, 29)), 10);
        assert_eq!(minutes_between(at(13, 0, 0), at(13, 10, 30)), 11);
    }

    #[test]
    fn test_sleep_log_derives_duration() {
        let mut input = new_input(ActivityType::Sleep);
        input.start_time = Some(at(19, 45, 0));
        input.end_time = Some(at(23, 15, 0));
        input.duration = Some(5); // ignored in favour of the timestamps

        assert_eq!(validate_new_log(&input).unwrap(), Some(210));
    }

    #[test]
    fn test_sleep_log_requires_start_time() {
        let input = new_input(ActivityType::Sleep);
        assert!(matches!(validate_new_log(&input), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_sleep_log_rejects_end_before_start() {
        let mut input = new_input(ActivityType::Sleep);
        input.start_time = Some(at(14, 0, 0));
        input.end_time = Some(at(13, 0, 0));
        assert!(matches!(validate_new_log(&input), Err(AppError::Validation(_))));

        input.end_time = input.start_time;
        assert!(validate_new_log(&input).is_err());
    }

    #[test]
    fn test_open_sleep_log_has_no_duration() {
        let mut input = new_input(ActivityType::Sleep);
        input.start_time = Some(at(20, 0, 0));
        assert_eq!(validate_new_log(&input).unwrap(), None);
    }

    #[test]
    fn test_type_specific_required_fields() {
        let mut feeding = new_input(ActivityType::Feeding);
        assert!(validate_new_log(&feeding).is_err());
        feeding.feeding_type = Some(FeedingType::Formula);
        feeding.feeding_amount = Some(120);
        assert!(validate_new_log(&feeding).is_ok());

        let mut diaper = new_input(ActivityType::Diaper);
        assert!(validate_new_log(&diaper).is_err());
        diaper.diaper_type = Some(DiaperType::Both);
        assert!(validate_new_log(&diaper).is_ok());

        let mut custom = new_input(ActivityType::Custom);
        custom.custom_activity_name = Some("   ".to_string());
        assert!(validate_new_log(&custom).is_err());
        custom.custom_activity_name = Some("Tummy time".to_string());
        custom.duration = Some(15);
        assert_eq!(validate_new_log(&custom).unwrap(), Some(15));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut feeding = new_input(ActivityType::Feeding);
        feeding.feeding_type = Some(FeedingType::Nursing);
        feeding.feeding_amount = Some(-10);
        assert!(matches!(validate_new_log(&feeding), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_recomputes_sleep_duration() {
        let existing = existing_sleep();
        let input = UpdateActivityLogInput {
            end_time: Some(at(15, 30, 0)),
            ..Default::default()
        };

        let updated = apply_update(&existing, &input).unwrap();
        assert_eq!(updated.duration, Some(150));
        assert_eq!(updated.sleep_location.as_deref(), Some("crib"));
    }

    #[test]
    fn test_update_without_fields_is_rejected() {
        let existing = existing_sleep();
        let result = apply_update(&existing, &UpdateActivityLogInput::default());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_update_keeps_duration_when_times_untouched() {
        let existing = existing_sleep();
        let input = UpdateActivityLogInput {
            notes: Some("woke up once".to_string()),
            ..Default::default()
        };

        let updated = apply_update(&existing, &input).unwrap();
        assert_eq!(updated.duration, Some(60));
        assert_eq!(updated.notes.as_deref(), Some("woke up once"));
    }
}
