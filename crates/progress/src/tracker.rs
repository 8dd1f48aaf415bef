//! Study analytics service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use studydesk_core::{StudyItem, Time};
use studydesk_storage::Store;
use tracing::{debug, warn};

use crate::activity::{ActivityLog, DayConvention};
use crate::config::AnalyticsConfig;
use crate::goals::{calculate_progress, YearlyProgress};
use crate::heatmap::{generate_heatmap, Heatmap};
use crate::metrics::StudyMetrics;
use crate::streak::{calculate_streak, StreakResult};

/// Everything the dashboard shows, computed at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// When the snapshot was taken
    pub timestamp: Time,

    /// Calendar day of `timestamp` under the configured convention
    pub today: NaiveDate,

    /// Headline cards
    pub metrics: StudyMetrics,

    /// Yearly goal bars
    pub progress: YearlyProgress,

    /// Activity grid
    pub heatmap: Heatmap,
}

/// Computes analytics from item lists and an explicit "now".
///
/// Holds no item state: every call rebuilds its activity log from the
/// slices it is given.
#[derive(Debug, Clone, Default)]
pub struct StudyAnalytics {
    config: AnalyticsConfig,
}

impl StudyAnalytics {
    /// Analytics with default goals and UTC days.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn convention(&self) -> DayConvention {
        self.config.day_convention().unwrap_or_else(|| {
            warn!(
                "utc_offset_minutes {} out of range, using UTC days",
                self.config.utc_offset_minutes
            );
            DayConvention::utc()
        })
    }

    /// Calendar day `now` falls on.
    pub fn today(&self, now: Time) -> NaiveDate {
        self.convention().day_of(&now)
    }

    /// Fold both item lists into a fresh log.
    pub fn activity_log<W, T>(&self, worksheets: &[W], todos: &[T]) -> ActivityLog
    where
        W: StudyItem,
        T: StudyItem,
    {
        ActivityLog::from_items(self.convention(), worksheets, todos)
    }

    /// Current and best streak.
    pub fn streak<W, T>(&self, worksheets: &[W], todos: &[T], now: Time) -> StreakResult
    where
        W: StudyItem,
        T: StudyItem,
    {
        calculate_streak(&self.activity_log(worksheets, todos), self.today(now))
    }

    /// Per-day creation counts for the trailing year.
    pub fn heatmap<W, T>(&self, worksheets: &[W], todos: &[T], now: Time) -> Heatmap
    where
        W: StudyItem,
        T: StudyItem,
    {
        generate_heatmap(&self.activity_log(worksheets, todos), self.today(now))
    }

    /// Yearly goal percentages.
    pub fn progress<W, T>(&self, worksheets: &[W], todos: &[T], now: Time) -> YearlyProgress
    where
        W: StudyItem,
        T: StudyItem,
    {
        calculate_progress(worksheets, todos, self.today(now), &self.config)
    }

    /// Dashboard cards.
    pub fn metrics<W, T>(&self, worksheets: &[W], todos: &[T], now: Time) -> StudyMetrics
    where
        W: StudyItem,
        T: StudyItem,
    {
        let streak = self.streak(worksheets, todos, now);
        StudyMetrics::from_parts(worksheets, todos, streak, &self.config)
    }

    /// All dashboard figures from a single activity log.
    pub fn snapshot<W, T>(&self, worksheets: &[W], todos: &[T], now: Time) -> DashboardSnapshot
    where
        W: StudyItem,
        T: StudyItem,
    {
        let today = self.today(now);
        let log = self.activity_log(worksheets, todos);

        let future = log.created_after(today);
        if future > 0 {
            warn!("{} items are dated after {} and fall outside the window", future, today);
        }

        let streak = calculate_streak(&log, today);
        let snapshot = DashboardSnapshot {
            timestamp: now,
            today,
            metrics: StudyMetrics::from_parts(worksheets, todos, streak, &self.config),
            progress: calculate_progress(worksheets, todos, today, &self.config),
            heatmap: generate_heatmap(&log, today),
        };

        debug!("Dashboard snapshot for {} over {} items", today, log.len());
        snapshot
    }

    /// Snapshot of whatever a store currently holds.
    pub fn snapshot_store<S: Store + ?Sized>(&self, store: &S, now: Time) -> DashboardSnapshot {
        self.snapshot(store.worksheets(), store.todos(), now)
    }
}
