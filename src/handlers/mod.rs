pub mod activity_logs_handler;
pub mod analytics_handler;
pub mod auth_handler;
pub mod debug;
pub mod health;
pub mod library_handler;
pub mod metrics;
pub mod notifications_handler;
pub mod sleep_schedules_handler;

pub use debug::debug_handler;
pub use health::health_check;
pub use metrics::{metrics_handler, setup_metrics_recorder, MetricsState};
