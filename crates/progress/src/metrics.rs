//! Headline study metrics for the dashboard cards.

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::goals::count_completed;
use crate::streak::StreakResult;
use studydesk_core::StudyItem;

/// Study time, completed tasks and streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMetrics {
    /// Whole hours of credited study time
    pub total_hours: u64,

    /// Minutes left over after `total_hours`
    pub total_minutes: u64,

    /// Completed worksheets and todos
    pub tasks_completed: usize,

    /// Streak figures
    #[serde(flatten)]
    pub streak: StreakResult,
}

impl StudyMetrics {
    /// Combine item counts with an already computed streak.
    pub fn from_parts<W, T>(
        worksheets: &[W],
        todos: &[T],
        streak: StreakResult,
        config: &AnalyticsConfig,
    ) -> Self
    where
        W: StudyItem,
        T: StudyItem,
    {
        let minutes = worksheets.len() as u64 * config.minutes_per_item as u64;
        Self {
            total_hours: minutes / 60,
            total_minutes: minutes % 60,
            tasks_completed: count_completed(worksheets) + count_completed(todos),
            streak,
        }
    }

    /// Study time as `"{h}h {m}m"`.
    pub fn study_time_label(&self) -> String {
        format!("{}h {}m", self.total_hours, self.total_minutes)
    }
}
