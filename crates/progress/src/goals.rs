//! Yearly goal progress bars.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use studydesk_core::StudyItem;
use tracing::debug;

use crate::config::{AnalyticsConfig, DAYS_IN_YEAR};

/// Label of the study time bar.
pub const STUDY_HOURS: &str = "Study Hours";

/// Label of the completed tasks bar.
pub const TASKS_COMPLETED: &str = "Tasks Completed";

/// Label of the calendar bar.
pub const YEAR_PROGRESS: &str = "Year Progress";

/// Progress toward each yearly goal, as percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProgress {
    /// Credited study time against the yearly hours goal
    pub study_hours: f64,

    /// Completed worksheets and todos against the yearly task goal
    pub tasks_completed: f64,

    /// Share of the year already elapsed
    pub year_progress: f64,
}

impl YearlyProgress {
    /// Label/percentage pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            (STUDY_HOURS, self.study_hours),
            (TASKS_COMPLETED, self.tasks_completed),
            (YEAR_PROGRESS, self.year_progress),
        ]
    }

    /// Goal name to percentage.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// `value / goal` as a percentage clamped to `[0, 100]`.
fn percent(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (value / goal * 100.0).clamp(0.0, 100.0)
}

/// Compute the yearly goal bars.
///
/// Study time is credited per worksheet; todos only count toward the tasks
/// goal. Year progress counts whole days since January 1st of `today`'s
/// year over a 365-day year.
pub fn calculate_progress<W, T>(
    worksheets: &[W],
    todos: &[T],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> YearlyProgress
where
    W: StudyItem,
    T: StudyItem,
{
    let study_minutes = worksheets.len() as f64 * config.minutes_per_item as f64;
    let completed = count_completed(worksheets) + count_completed(todos);

    let progress = YearlyProgress {
        study_hours: percent(study_minutes, config.yearly_study_minutes() as f64),
        tasks_completed: percent(completed as f64, config.yearly_task_goal as f64),
        year_progress: percent(today.ordinal0() as f64, DAYS_IN_YEAR as f64),
    };

    debug!(
        "Yearly progress as of {}: study={:.1}% tasks={:.1}% year={:.1}%",
        today, progress.study_hours, progress.tasks_completed, progress.year_progress
    );
    progress
}

/// Number of completed items in a slice.
pub(crate) fn count_completed<I: StudyItem>(items: &[I]) -> usize {
    items.iter().filter(|i| i.is_completed()).count()
}
