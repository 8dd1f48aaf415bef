//! Progress Tracking
//!
//! Study streaks, activity heatmap and yearly goal progress, computed from
//! worksheet and todo lists.

#![warn(missing_docs)]

pub mod activity;
pub mod config;
pub mod streak;
pub mod heatmap;
pub mod goals;
pub mod metrics;
pub mod tracker;

pub use activity::{ActivityDay, ActivityLog, DayConvention};
pub use config::{AnalyticsConfig, ConfigError, DAYS_IN_YEAR, WINDOW_DAYS};
pub use streak::{calculate_streak, StreakResult};
pub use heatmap::{generate_heatmap, Heatmap, HeatmapEntry, Intensity};
pub use goals::{calculate_progress, YearlyProgress, STUDY_HOURS, TASKS_COMPLETED, YEAR_PROGRESS};
pub use metrics::StudyMetrics;
pub use tracker::{DashboardSnapshot, StudyAnalytics};
