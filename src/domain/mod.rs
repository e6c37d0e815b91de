pub mod activity;
pub mod aggregation;
pub mod catalog;
pub mod insights;
pub mod notifications;
pub mod recommendations;
