use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slumber API",
        version = "1.0.0",
        description = "Backend API for tracking a baby's sleep, feeding and diaper changes, with sleep analytics and schedule guidance"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Operations
        crate::handlers::health::health_check,
        crate::handlers::metrics::metrics_handler,
        crate::handlers::debug::debug_handler,

        // Auth
        crate::handlers::auth_handler::get_me,
        crate::handlers::auth_handler::update_profile,

        // Activity logs
        crate::handlers::activity_logs_handler::list_activity_logs,
        crate::handlers::activity_logs_handler::get_activity_log,
        crate::handlers::activity_logs_handler::create_activity_log,
        crate::handlers::activity_logs_handler::update_activity_log,
        crate::handlers::activity_logs_handler::delete_activity_log,

        // Analytics
        crate::handlers::analytics_handler::get_analytics,
        crate::handlers::analytics_handler::get_tips,

        // Sleep schedules
        crate::handlers::sleep_schedules_handler::get_recommendation,
        crate::handlers::sleep_schedules_handler::list_schedules,
        crate::handlers::sleep_schedules_handler::get_active_schedule,
        crate::handlers::sleep_schedules_handler::get_schedule,
        crate::handlers::sleep_schedules_handler::create_schedule,
        crate::handlers::sleep_schedules_handler::update_schedule,
        crate::handlers::sleep_schedules_handler::activate_schedule,
        crate::handlers::sleep_schedules_handler::delete_schedule,

        // Notifications
        crate::handlers::notifications_handler::list_notifications,
        crate::handlers::notifications_handler::mark_read,
        crate::handlers::notifications_handler::decide,
        crate::handlers::notifications_handler::delete_notification,

        // Library
        crate::handlers::library_handler::list_articles,
        crate::handlers::library_handler::get_article_filters,
        crate::handlers::library_handler::get_article,
        crate::handlers::library_handler::list_audio,
    ),
    components(
        schemas(
            // Core models
            crate::models::ActivityLog,
            crate::models::ActivityType,
            crate::models::SleepType,
            crate::models::FeedingType,
            crate::models::DiaperType,
            crate::models::SleepSchedule,
            crate::models::ScheduleItem,
            crate::models::SleepRecommendation,
            crate::models::ScheduleNotification,
            crate::models::Profile,
            crate::models::Article,
            crate::models::ArticleFilters,
            crate::models::AudioTrack,

            // Analytics
            crate::models::AnalyticsReport,
            crate::models::DailySleepSummary,
            crate::models::DailyFeedingSummary,
            crate::models::SleepTrend,
            crate::models::ExpertTip,
            crate::models::TipPriority,

            // Input models
            crate::models::CreateActivityLogInput,
            crate::models::UpdateActivityLogInput,
            crate::models::ActivityLogMutationResponse,
            crate::models::CreateSleepScheduleInput,
            crate::models::UpdateSleepScheduleInput,
            crate::models::ScheduleMutationResponse,
            crate::models::NotificationDecisionInput,
            crate::models::NotificationMutationResponse,
            crate::models::UpdateProfileInput,

            crate::handlers::debug::DebugInfo,
        )
    ),
    tags(
        (name = "operations", description = "Health, metrics and diagnostics"),
        (name = "auth", description = "Current user and profile"),
        (name = "activity-logs", description = "Sleep, feeding, diaper and custom activity records"),
        (name = "analytics", description = "Daily summaries, trend and expert tips"),
        (name = "sleep-schedules", description = "Bedtime routine questionnaire and age-based schedules"),
        (name = "notifications", description = "Schedule update prompts"),
        (name = "library", description = "Articles and baby-safe audio"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::extractors::auth::ACCESS_TOKEN_COOKIE,
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/activity-logs",
            "/api/activity-logs/{id}",
            "/api/analytics",
            "/api/sleep-schedules/active",
            "/api/notifications/{id}/decision",
            "/api/library/articles/filters",
            "/api/auth/me",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
        assert!(schemes.contains_key("cookie_auth"));
    }
}
