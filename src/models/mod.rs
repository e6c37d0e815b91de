pub mod activity_log;
pub mod activity_log_input;
pub mod analytics;
pub mod library;
pub mod notification;
pub mod profile;
pub mod sleep_schedule;
pub mod sleep_schedule_input;

pub use activity_log::{ActivityLog, ActivityType, DiaperType, FeedingType, SleepType};
pub use activity_log_input::{ActivityLogMutationResponse, CreateActivityLogInput, UpdateActivityLogInput};
pub use analytics::{
    AnalyticsReport, DailyFeedingSummary, DailySleepSummary, ExpertTip, SleepTrend, TipPriority,
};
pub use library::{Article, ArticleFilters, AudioTrack};
pub use notification::{
    NotificationDecisionInput, NotificationMutationResponse, ScheduleNotification, AGE_UPDATE_NOTIFICATION,
};
pub use profile::{Profile, UpdateProfileInput};
pub use sleep_schedule::{ScheduleItem, SleepRecommendation, SleepSchedule};
pub use sleep_schedule_input::{CreateSleepScheduleInput, ScheduleMutationResponse, UpdateSleepScheduleInput};
