//! Activity log: study items bucketed by calendar day.
//!
//! Every analytics query starts here. Items are folded once into per-day
//! counters, so scanning the trailing window afterwards is a map lookup per
//! day rather than a pass over every item.

use std::collections::HashMap;

use chrono::{Duration, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use studydesk_core::{StudyItem, Time};

use crate::config::WINDOW_DAYS;

/// How timestamps are cut into calendar days.
///
/// One convention is chosen per computation and applied to every timestamp,
/// including "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayConvention {
    offset: FixedOffset,
}

impl DayConvention {
    /// Days start at 00:00 UTC.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Days start at local midnight for a fixed offset from UTC.
    ///
    /// Returns `None` for offsets of a full day or more.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    /// Calendar day a timestamp falls on.
    pub fn day_of(&self, at: &Time) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Hour of day (0-23) a timestamp falls on.
    pub fn hour_of(&self, at: &Time) -> u32 {
        at.with_timezone(&self.offset).hour()
    }

    /// The underlying offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for DayConvention {
    fn default() -> Self {
        Self::utc()
    }
}

/// Activity recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    /// The day
    pub date: NaiveDate,

    /// Completed items created on this day
    pub completed: u32,

    /// All items created on this day
    pub created: u32,
}

impl ActivityDay {
    /// A day counts toward a streak when something created on it is done.
    pub fn is_active(&self) -> bool {
        self.completed > 0
    }
}

/// Days of the trailing window, most recent first: today, yesterday, ...
pub fn trailing_window(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..WINDOW_DAYS as i64).map(move |back| today - Duration::days(back))
}

/// Per-day creation and completion counts.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    convention: DayConvention,
    completed: HashMap<NaiveDate, u32>,
    created: HashMap<NaiveDate, u32>,
    items: usize,
}

impl ActivityLog {
    /// Empty log using the given day convention.
    pub fn new(convention: DayConvention) -> Self {
        Self {
            convention,
            ..Default::default()
        }
    }

    /// Build a log from two item lists in one go.
    pub fn from_items<W, T>(convention: DayConvention, worksheets: &[W], todos: &[T]) -> Self
    where
        W: StudyItem,
        T: StudyItem,
    {
        let mut log = Self::new(convention);
        log.record_all(worksheets);
        log.record_all(todos);
        log
    }

    /// Fold one item into the log.
    pub fn record<I: StudyItem + ?Sized>(&mut self, item: &I) {
        let day = self.convention.day_of(&item.created_at());
        *self.created.entry(day).or_insert(0) += 1;
        if item.is_completed() {
            *self.completed.entry(day).or_insert(0) += 1;
        }
        self.items += 1;
    }

    /// Fold every item of a slice into the log.
    pub fn record_all<I: StudyItem>(&mut self, items: &[I]) {
        for item in items {
            self.record(item);
        }
    }

    /// The convention used to bucket timestamps.
    pub fn convention(&self) -> DayConvention {
        self.convention
    }

    /// Number of items recorded.
    pub fn len(&self) -> usize {
        self.items
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Activity on one day.
    pub fn day(&self, date: NaiveDate) -> ActivityDay {
        ActivityDay {
            date,
            completed: self.completed.get(&date).copied().unwrap_or(0),
            created: self.created.get(&date).copied().unwrap_or(0),
        }
    }

    /// Whether any completed item was created on `date`.
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.completed.get(&date).is_some_and(|&n| n > 0)
    }

    /// Items of any state created on `date`.
    pub fn created_on(&self, date: NaiveDate) -> u32 {
        self.created.get(&date).copied().unwrap_or(0)
    }

    /// The trailing window ending `today`, oldest day first.
    pub fn window(&self, today: NaiveDate) -> Vec<ActivityDay> {
        let mut days: Vec<ActivityDay> = trailing_window(today).map(|d| self.day(d)).collect();
        days.reverse();
        days
    }

    /// Items stamped after `today`. They never show up in a window.
    pub fn created_after(&self, today: NaiveDate) -> u32 {
        self.created
            .iter()
            .filter(|(day, _)| **day > today)
            .map(|(_, n)| *n)
            .sum()
    }
}
