//! Study streaks.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::{trailing_window, ActivityLog};

/// Current and best run of consecutive active days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Length of the run ending today, counted over today and yesterday only
    pub current_streak: u32,

    /// Longest run anywhere in the window, in days
    pub best_streak: u32,

    /// Earliest day counted in `current_streak`; `None` when it is 0
    pub streak_start: Option<NaiveDate>,
}

impl StreakResult {
    /// Whether the user has studied today.
    pub fn is_active(&self) -> bool {
        self.current_streak > 0
    }
}

/// Scan the trailing window ending `today` for streaks.
///
/// The window is walked from today backwards. While the initial run is
/// unbroken and the day is today or yesterday, the running count is taken
/// as the current streak, so it never exceeds 2. An inactive today ends the
/// initial run before yesterday is examined. Every run in the window, the
/// trailing one included, is measured for the best streak.
pub fn calculate_streak(log: &ActivityLog, today: NaiveDate) -> StreakResult {
    let mut result = StreakResult::default();
    let mut run = 0u32;
    let mut extending_current = true;

    for day in trailing_window(today) {
        if log.is_active(day) {
            run += 1;
            if extending_current && today - day <= Duration::days(1) {
                result.current_streak = run;
                result.streak_start = Some(day);
            }
        } else {
            result.best_streak = result.best_streak.max(run);
            run = 0;
            extending_current = false;
        }
    }
    result.best_streak = result.best_streak.max(run);

    debug!(
        "Streak as of {}: current={} best={}",
        today, result.current_streak, result.best_streak
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::DayConvention;
    use chrono::{Duration, TimeZone, Utc};
    use studydesk_core::{StudyItem, Time};

    struct Item {
        done: bool,
        at: Time,
    }

    impl StudyItem for Item {
        fn is_completed(&self) -> bool {
            self.done
        }

        fn created_at(&self) -> Time {
            self.at
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn done_days_ago(days: i64) -> Item {
        let noon = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        Item { done: true, at: noon - Duration::days(days) }
    }

    fn streak(items: &[Item]) -> StreakResult {
        let mut log = ActivityLog::new(DayConvention::utc());
        log.record_all(items);
        calculate_streak(&log, today())
    }

    #[test]
    fn test_empty_log() {
        assert_eq!(streak(&[]), StreakResult::default());
        assert_eq!(streak(&[]).streak_start, None);
    }

    #[test]
    fn test_completed_today() {
        let result = streak(&[done_days_ago(0)]);
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.streak_start, Some(today()));
        assert!(result.best_streak >= 1);
        assert!(result.is_active());
    }

    #[test]
    fn test_today_and_yesterday() {
        let result = streak(&[done_days_ago(0), done_days_ago(1)]);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.streak_start, Some(today() - Duration::days(1)));
        assert!(result.best_streak >= 2);
    }

    #[test]
    fn test_long_current_run() {
        let items: Vec<Item> = (0..30).map(done_days_ago).collect();
        let result = streak(&items);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.best_streak, 30);
        assert_eq!(result.streak_start, Some(today() - Duration::days(1)));
    }

    #[test]
    fn test_current_streak_stops_at_yesterday() {
        let result = streak(&[done_days_ago(0), done_days_ago(1), done_days_ago(2)]);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.streak_start, Some(today() - Duration::days(1)));
        assert_eq!(result.best_streak, 3);
    }

    #[test]
    fn test_old_run_only_counts_as_best() {
        // ten days ending five days ago
        let items: Vec<Item> = (5..15).map(done_days_ago).collect();
        let result = streak(&items);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.best_streak, 10);
        assert_eq!(result.streak_start, None);
    }

    #[test]
    fn test_yesterday_alone_is_not_current() {
        let result = streak(&[done_days_ago(1), done_days_ago(2)]);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.best_streak, 2);
        assert_eq!(result.streak_start, None);
    }

    #[test]
    fn test_incomplete_items_do_not_count() {
        let items = [Item { done: false, ..done_days_ago(0) }];
        assert_eq!(streak(&items), StreakResult::default());
    }

    #[test]
    fn test_best_beats_current() {
        let mut items: Vec<Item> = (0..3).map(done_days_ago).collect();
        items.extend((10..20).map(done_days_ago));
        let result = streak(&items);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.best_streak, 10);
    }

    #[test]
    fn test_run_at_window_edge_counts() {
        let items: Vec<Item> = (360..365).map(done_days_ago).collect();
        assert_eq!(streak(&items).best_streak, 5);
    }

    #[test]
    fn test_activity_outside_window_ignored() {
        let items: Vec<Item> = (365..400).map(done_days_ago).collect();
        assert_eq!(streak(&items).best_streak, 0);
    }

    #[test]
    fn test_best_never_below_current() {
        let patterns: [&[i64]; 4] = [&[0, 1, 2, 5, 6], &[0], &[3, 4, 0], &[0, 2, 4, 6, 7, 8, 9]];
        for pattern in patterns {
            let items: Vec<Item> = pattern.iter().copied().map(done_days_ago).collect();
            let result = streak(&items);
            assert!(result.best_streak >= result.current_streak, "{:?}", pattern);
        }
    }
}
