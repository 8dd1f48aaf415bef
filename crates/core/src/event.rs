//! Calendar event model.

use serde::{Deserialize, Serialize};
use crate::id::{EventId, TodoId, WorksheetId};
use crate::Time;

/// An entry on the study calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier
    pub id: EventId,

    /// Display title
    pub title: String,

    /// When it happens
    pub date: Time,

    /// What created the event
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Linked worksheet, if the event tracks one
    #[serde(default)]
    pub worksheet_id: Option<WorksheetId>,

    /// Linked todo, if the event tracks one
    #[serde(default)]
    pub todo_id: Option<TodoId>,

    /// Display colour (`#rrggbb`)
    #[serde(default)]
    pub color: Option<String>,
}

impl CalendarEvent {
    /// Create an unlinked event.
    pub fn new(title: impl Into<String>, date: Time, kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            date,
            kind,
            worksheet_id: None,
            todo_id: None,
            color: None,
        }
    }

    /// Event tracking a worksheet's due date.
    pub fn for_worksheet(id: WorksheetId, title: impl Into<String>, date: Time) -> Self {
        Self {
            worksheet_id: Some(id),
            ..Self::new(title, date, EventKind::Resource)
        }
    }

    /// Event tracking a todo's due date.
    pub fn for_todo(id: TodoId, title: impl Into<String>, date: Time) -> Self {
        Self {
            todo_id: Some(id),
            ..Self::new(title, date, EventKind::Todo)
        }
    }

    /// Merge a partial update.
    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
    }

    /// Whether the event falls on the given calendar day (UTC).
    pub fn is_on(&self, day: chrono::NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}

/// Where a calendar event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Worksheet due date
    Resource,
    /// Reminder
    Reminder,
    /// Created by hand on the calendar
    Custom,
    /// Todo due date
    Todo,
}

/// Partial update for an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<Time>,
    pub kind: Option<EventKind>,
    pub color: Option<String>,
}
