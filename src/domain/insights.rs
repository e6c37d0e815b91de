use chrono::FixedOffset;

use crate::{
    domain::aggregation::{summarize_feeding, summarize_sleep, NightWindow},
    models::{
        ActivityLog, AnalyticsReport, DailyFeedingSummary, DailySleepSummary, ExpertTip,
        SleepTrend, TipPriority,
    },
};

const TREND_WINDOW_DAYS: usize = 7;
const TREND_THRESHOLD_MINUTES: f64 = 30.0;

/// Builds the full analytics report for an ascending list of activity logs
pub fn build_report(
    logs: &[ActivityLog],
    days: i64,
    offset: FixedOffset,
    window: NightWindow,
) -> AnalyticsReport {
    let sleep = summarize_sleep(logs, offset, window);
    let feeding = summarize_feeding(logs, offset);

    let average_sleep_minutes = average(sleep.iter().map(|d| d.total_sleep_minutes as f64));
    let average_night_wakings = average(sleep.iter().map(|d| f64::from(d.night_wakings)));
    let average_feedings_per_day = average(feeding.iter().map(|d| f64::from(d.frequency)));
    let trend = sleep_trend(&sleep);
    let tips = expert_tips(&sleep, &feeding);

    AnalyticsReport {
        days,
        sleep,
        feeding,
        average_sleep_minutes,
        average_night_wakings,
        average_feedings_per_day,
        trend,
        tips,
    }
}

/// Compares the first and last week of daily sleep totals
pub fn sleep_trend(sleep: &[DailySleepSummary]) -> SleepTrend {
    if sleep.len() < TREND_WINDOW_DAYS {
        return SleepTrend::Neutral;
    }

    let first_week = week_mean(&sleep[..TREND_WINDOW_DAYS], |d| d.total_sleep_minutes as f64);
    let last_week = week_mean(&sleep[sleep.len() - TREND_WINDOW_DAYS..], |d| {
        d.total_sleep_minutes as f64
    });

    if last_week > first_week + TREND_THRESHOLD_MINUTES {
        SleepTrend::Improving
    } else if last_week < first_week - TREND_THRESHOLD_MINUTES {
        SleepTrend::Declining
    } else {
        SleepTrend::Stable
    }
}

pub fn expert_tips(sleep: &[DailySleepSummary], feeding: &[DailyFeedingSummary]) -> Vec<ExpertTip> {
    let avg_sleep = average(sleep.iter().map(|d| d.total_sleep_minutes as f64));
    let avg_wakings = average(sleep.iter().map(|d| f64::from(d.night_wakings)));
    let avg_feedings = average(feeding.iter().map(|d| f64::from(d.frequency)));

    let mut tips = Vec::new();

    if avg_sleep > 0.0 && avg_sleep < 600.0 {
        tips.push(tip(
            "Optimize Sleep Duration",
            format!(
                "Current average: {}. Most babies need 11-14 hours of sleep per day. Consider adjusting nap schedules or bedtime routine.",
                format_minutes(avg_sleep.round() as i64)
            ),
            TipPriority::High,
        ));
    }

    if avg_wakings > 2.5 {
        tips.push(tip(
            "Reduce Night Wakings",
            format!(
                "Average {} wakings per night. This may indicate hunger, discomfort, or sleep associations. Consider gentle sleep training or environmental adjustments.",
                format_one_decimal(avg_wakings)
            ),
            TipPriority::Medium,
        ));
    }

    if avg_feedings > 12.0 {
        tips.push(tip(
            "Monitor Feeding Frequency",
            format!(
                "High feeding frequency ({} per day) may indicate growth spurts or insufficient intake per feeding. Consult your pediatrician if concerned.",
                avg_feedings.round()
            ),
            TipPriority::Medium,
        ));
    } else if avg_feedings > 0.0 && avg_feedings < 6.0 {
        tips.push(tip(
            "Feeding Frequency Check",
            format!(
                "Lower feeding frequency ({} per day). Ensure baby is getting adequate nutrition. Monitor weight gain and consult pediatrician.",
                avg_feedings.round()
            ),
            TipPriority::Medium,
        ));
    }

    match sleep_trend(sleep) {
        SleepTrend::Improving => tips.push(tip(
            "Excellent Progress!",
            "Sleep patterns are improving consistently. Your current routine is working well - maintain consistency for continued success.",
            TipPriority::Low,
        )),
        SleepTrend::Declining => tips.push(tip(
            "Sleep Pattern Concerns",
            "Sleep duration has been decreasing. Consider reviewing recent changes in routine, environment, or developmental milestones that might be affecting sleep.",
            TipPriority::High,
        )),
        SleepTrend::Neutral | SleepTrend::Stable => {}
    }

    if sleep.len() > TREND_WINDOW_DAYS {
        let wakings = |d: &DailySleepSummary| f64::from(d.night_wakings);
        let earlier = week_mean(&sleep[..TREND_WINDOW_DAYS], wakings);
        let recent = week_mean(&sleep[sleep.len() - TREND_WINDOW_DAYS..], wakings);

        if recent > earlier + 1.0 {
            tips.push(tip(
                "Sleep Regression Alert",
                "Recent increase in night wakings may indicate a sleep regression, growth spurt, or developmental leap. These are temporary phases.",
                TipPriority::Medium,
            ));
        }
    }

    if tips.is_empty() {
        tips.push(tip(
            "Healthy Sleep Patterns",
            "Your baby's sleep and feeding patterns look healthy! Continue with your current routine and monitor for any changes.",
            TipPriority::Low,
        ));
    }

    tips
}

/// Renders minutes as `Xh Ym`
pub fn format_minutes(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn format_one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

fn tip(title: &str, description: impl Into<String>, priority: TipPriority) -> ExpertTip {
    ExpertTip {
        title: title.to_string(),
        description: description.into(),
        priority,
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn week_mean(days: &[DailySleepSummary], value: impl Fn(&DailySleepSummary) -> f64) -> f64 {
    days.iter().map(value).sum::<f64>() / TREND_WINDOW_DAYS as f64
}
