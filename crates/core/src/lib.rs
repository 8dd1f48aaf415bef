//! StudyDesk core data models.
//!
//! This crate defines the records a study dashboard keeps in memory:
//! worksheets, todos, timers, calendar events and user preferences.

#![warn(missing_docs)]

// Core identities
mod id;

// Study records
mod item;
mod worksheet;
mod todo;

// Planning aids
mod timer;
mod event;

// Preferences
mod settings;
pub mod theme;

// Re-exports
pub use id::*;

pub use item::StudyItem;
pub use worksheet::{Worksheet, WorksheetFile, NewWorksheet, WorksheetPatch};
pub use todo::{Todo, TodoPatch};
pub use timer::{Timer, TimerPatch};
pub use event::{CalendarEvent, EventKind, EventPatch};
pub use settings::{
    Settings, SettingsPatch, ThemeMode, DateFormat, CustomTheme, ParseError,
    MAX_RECENT_THEMES, MIN_READABLE_CONTRAST,
};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
