//! Rolls raw activity logs into per-day sleep and feeding summaries.
//!
//! Single forward pass, keyed by the calendar date of each event in the
//! caller's UTC offset. Records missing the fields a statistic needs simply
//! don't contribute to it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};
use std::collections::BTreeMap;

use crate::{
    domain::activity::minutes_between,
    models::{ActivityLog, ActivityType, DailyFeedingSummary, DailySleepSummary, SleepType},
};

/// Number of most recent days kept in each series
pub const SUMMARY_DAYS: usize = 14;

const MAX_SLEEP_MINUTES: i64 = 24 * 60;
const MAX_FEEDING_MINUTES: i64 = 120;
/// Nighttime stretches shorter than this are counted as a waking
const NIGHT_WAKING_MAX_MINUTES: i32 = 240;

/// Hours of the day during which a short nighttime sleep counts as a waking.
/// Both ends are inclusive; a window whose start is after its end wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl NightWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour <= self.end_hour
        } else {
            hour >= self.start_hour || hour <= self.end_hour
        }
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self::new(20, 7)
    }
}

#[derive(Default)]
struct SleepDay {
    total_minutes: i64,
    night_wakings: u32,
    bedtime: Option<NaiveTime>,
    wake_time: Option<NaiveTime>,
}

#[derive(Default)]
struct FeedingDay {
    frequency: u32,
    duration_sum: i64,
    duration_count: u32,
    amount_sum: i64,
    amount_count: u32,
}

pub fn summarize_sleep(
    logs: &[ActivityLog],
    offset: FixedOffset,
    window: NightWindow,
) -> Vec<DailySleepSummary> {
    let mut days: BTreeMap<NaiveDate, SleepDay> = BTreeMap::new();

    for log in logs.iter().filter(|l| l.activity_type == ActivityType::Sleep) {
        let started = local(log.occurred_at(), offset);
        let day = days.entry(started.date_naive()).or_default();

        day.total_minutes += sleep_minutes(log);

        if log.sleep_type != Some(SleepType::Nighttime) {
            continue;
        }

        let short_stretch = log.duration.map_or(true, |d| d < NIGHT_WAKING_MAX_MINUTES);
        if window.contains(started.hour()) && short_stretch {
            day.night_wakings += 1;
        }

        if (18..=23).contains(&started.hour()) {
            let time = started.time();
            if day.bedtime.map_or(true, |current| time < current) {
                day.bedtime = Some(time);
            }
        }

        if let Some(end) = log.end_time {
            let ended = local(end, offset);
            if (5..=10).contains(&ended.hour()) {
                let time = ended.time();
                if day.wake_time.map_or(true, |current| time > current) {
                    day.wake_time = Some(time);
                }
            }
        }
    }

    let summaries: Vec<DailySleepSummary> = days
        .into_iter()
        .map(|(date, day)| DailySleepSummary {
            date,
            total_sleep_minutes: day.total_minutes,
            night_wakings: day.night_wakings,
            bedtime: day.bedtime.map(format_clock),
            wake_time: day.wake_time.map(format_clock),
        })
        .collect();

    keep_recent(summaries)
}

pub fn summarize_feeding(logs: &[ActivityLog], offset: FixedOffset) -> Vec<DailyFeedingSummary> {
    let mut days: BTreeMap<NaiveDate, FeedingDay> = BTreeMap::new();

    for log in logs.iter().filter(|l| l.activity_type == ActivityType::Feeding) {
        let day = days
            .entry(local(log.occurred_at(), offset).date_naive())
            .or_default();

        day.frequency += 1;

        if let Some(minutes) = feeding_minutes(log) {
            day.duration_sum += minutes;
            day.duration_count += 1;
        }

        if let Some(amount) = log.feeding_amount.filter(|a| *a > 0) {
            day.amount_sum += i64::from(amount);
            day.amount_count += 1;
        }
    }

    let summaries: Vec<DailyFeedingSummary> = days
        .into_iter()
        .map(|(date, day)| DailyFeedingSummary {
            date,
            frequency: day.frequency,
            average_duration_minutes: mean(day.duration_sum, day.duration_count),
            total_amount_ml: day.amount_sum,
            average_amount_ml: mean(day.amount_sum, day.amount_count),
        })
        .collect();

    keep_recent(summaries)
}

/// Minutes a sleep log adds to its day: the recorded duration, otherwise the
/// span between its timestamps when that span is plausible
fn sleep_minutes(log: &ActivityLog) -> i64 {
    match log.duration {
        Some(d) if d > 0 => i64::from(d),
        _ => match (log.start_time, log.end_time) {
            (Some(start), Some(end)) => {
                let minutes = minutes_between(start, end);
                if minutes > 0 && minutes < MAX_SLEEP_MINUTES {
                    minutes
                } else {
                    0
                }
            }
            _ => 0,
        },
    }
}

fn feeding_minutes(log: &ActivityLog) -> Option<i64> {
    match log.duration {
        Some(d) if d > 0 => Some(i64::from(d)),
        _ => {
            let minutes = minutes_between(log.start_time?, log.end_time?);
            (minutes > 0 && minutes < MAX_FEEDING_MINUTES).then_some(minutes)
        }
    }
}

fn local(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset)
}

fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn mean(sum: i64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

fn keep_recent<T>(mut summaries: Vec<T>) -> Vec<T> {
    if summaries.len() > SUMMARY_DAYS {
        summaries.drain(..summaries.len() - SUMMARY_DAYS);
    }
    summaries
}
