//! Daily activity heatmap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::ActivityLog;

/// Item count for one day of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    /// The day
    pub date: NaiveDate,

    /// Items created on that day
    pub value: u32,
}

impl HeatmapEntry {
    /// Shade bucket used when drawing the cell.
    pub fn intensity(&self) -> Intensity {
        match self.value {
            0 => Intensity::None,
            1..=2 => Intensity::Low,
            3..=4 => Intensity::Medium,
            _ => Intensity::High,
        }
    }
}

/// Rendering level of a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// No activity
    None,
    /// 1-2 items
    Low,
    /// 3-4 items
    Medium,
    /// 5 or more
    High,
}

/// One entry per day of the trailing window, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heatmap(Vec<HeatmapEntry>);

impl Heatmap {
    /// Entries in chronological order.
    pub fn entries(&self) -> &[HeatmapEntry] {
        &self.0
    }

    /// Take the entries.
    pub fn into_entries(self) -> Vec<HeatmapEntry> {
        self.0
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no days are covered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all day values.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|e| e.value as u64).sum()
    }

    /// Days with at least one item.
    pub fn active_days(&self) -> usize {
        self.0.iter().filter(|e| e.value > 0).count()
    }

    /// The day with the most items; the latest such day on ties.
    pub fn busiest(&self) -> Option<&HeatmapEntry> {
        self.0.iter().filter(|e| e.value > 0).max_by_key(|e| e.value)
    }

    /// The most recent `days` entries, still oldest first.
    pub fn last(&self, days: usize) -> &[HeatmapEntry] {
        let start = self.0.len().saturating_sub(days);
        &self.0[start..]
    }
}

/// Count items created on each day of the window ending `today`.
///
/// Completion is irrelevant here; every item counts on its creation day.
pub fn generate_heatmap(log: &ActivityLog, today: NaiveDate) -> Heatmap {
    let entries: Vec<HeatmapEntry> = log
        .window(today)
        .into_iter()
        .map(|day| HeatmapEntry {
            date: day.date,
            value: day.created,
        })
        .collect();

    let heatmap = Heatmap(entries);
    debug!(
        "Heatmap ending {}: {} items over {} active days",
        today,
        heatmap.total(),
        heatmap.active_days()
    );
    heatmap
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

    fn created_days_ago(days: i64, done: bool) -> Item {
        let morning = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        Item { done, at: morning - Duration::days(days) }
    }

    fn heatmap(items: &[Item]) -> Heatmap {
        let mut log = ActivityLog::new(DayConvention::utc());
        log.record_all(items);
        generate_heatmap(&log, today())
    }

    #[test]
    fn test_empty_heatmap_is_all_zero() {
        let map = heatmap(&[]);
        assert_eq!(map.len(), 365);
        assert!(map.entries().iter().all(|e| e.value == 0));
        assert_eq!(map.total(), 0);
        assert!(map.busiest().is_none());
    }

    #[test]
    fn test_ordered_oldest_first() {
        let map = heatmap(&[]);
        assert_eq!(map.entries()[0].date, today() - Duration::days(364));
        assert_eq!(map.entries()[364].date, today());
    }

    #[test]
    fn test_counts_regardless_of_completion() {
        let map = heatmap(&[
            created_days_ago(0, true),
            created_days_ago(0, false),
            created_days_ago(3, false),
        ]);
        assert_eq!(map.entries()[364].value, 2);
        assert_eq!(map.entries()[361].value, 1);
        assert_eq!(map.active_days(), 2);
    }

    #[test]
    fn test_total_only_counts_window() {
        let map = heatmap(&[
            created_days_ago(0, true),
            created_days_ago(364, false),
            created_days_ago(365, true),
            created_days_ago(-1, false),
        ]);
        assert_eq!(map.total(), 2);
    }

    #[test]
    fn test_intensity_buckets() {
        let entry = |value| HeatmapEntry { date: today(), value };
        assert_eq!(entry(0).intensity(), Intensity::None);
        assert_eq!(entry(2).intensity(), Intensity::Low);
        assert_eq!(entry(3).intensity(), Intensity::Medium);
        assert_eq!(entry(4).intensity(), Intensity::Medium);
        assert_eq!(entry(9).intensity(), Intensity::High);
    }

    #[test]
    fn test_last_and_busiest() {
        let map = heatmap(&[
            created_days_ago(1, false),
            created_days_ago(1, false),
            created_days_ago(0, false),
        ]);
        let week = map.last(7);
        assert_eq!(week.len(), 7);
        assert_eq!(week[6].date, today());
        assert_eq!(map.busiest().map(|e| e.date), Some(today() - Duration::days(1)));
        assert_eq!(map.last(1000).len(), 365);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let json = serde_json::to_value(heatmap(&[])).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(365));
    }
}
