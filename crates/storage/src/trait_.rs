//! Store trait abstraction.

use studydesk_core::{
    CalendarEvent, EventId, EventPatch, FileId, NewWorksheet, Settings, SettingsPatch, Timer,
    TimerId, TimerPatch, Time, Todo, TodoId, TodoPatch, Worksheet, WorksheetFile, WorksheetId,
    WorksheetPatch,
};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected input
    #[error("Invalid: {0}")]
    Invalid(String),
}

/// Store abstraction for dashboard state.
///
/// Mutations on an unknown id fail with [`StorageError::NotFound`]. Linked
/// calendar events follow the worksheet or todo that owns them.
pub trait Store {
    // === Worksheet operations ===

    /// Create a worksheet. A due date also creates a linked calendar event.
    fn add_worksheet(&mut self, new: NewWorksheet) -> Result<Worksheet>;

    /// Apply a partial update. A new due date moves the linked event.
    fn update_worksheet(&mut self, id: WorksheetId, patch: WorksheetPatch) -> Result<()>;

    /// Delete a worksheet and its linked events.
    fn delete_worksheet(&mut self, id: WorksheetId) -> Result<()>;

    /// Flip the completion flag; returns the new value.
    fn toggle_complete(&mut self, id: WorksheetId) -> Result<bool>;

    /// Attach a file to a worksheet.
    fn add_file(&mut self, worksheet_id: WorksheetId, file: WorksheetFile) -> Result<()>;

    /// Remove an attached file.
    fn delete_file(&mut self, worksheet_id: WorksheetId, file_id: FileId) -> Result<()>;

    /// Load a worksheet by ID.
    fn load_worksheet(&self, id: WorksheetId) -> Option<&Worksheet>;

    /// All worksheets in insertion order.
    fn worksheets(&self) -> &[Worksheet];

    // === Todo operations ===

    /// Create a todo and its linked calendar event.
    fn add_todo(&mut self, title: String, due_date: Time, notes: Option<String>) -> Result<Todo>;

    /// Apply a partial update. A new due date moves the linked event.
    fn update_todo(&mut self, id: TodoId, patch: TodoPatch) -> Result<()>;

    /// Delete a todo and its linked events.
    fn delete_todo(&mut self, id: TodoId) -> Result<()>;

    /// Flip the completion flag; returns the new value.
    fn toggle_todo_complete(&mut self, id: TodoId) -> Result<bool>;

    /// Load a todo by ID.
    fn load_todo(&self, id: TodoId) -> Option<&Todo>;

    /// All todos in insertion order.
    fn todos(&self) -> &[Todo];

    // === Calendar operations ===

    /// Add a calendar event.
    fn add_event(&mut self, event: CalendarEvent) -> Result<CalendarEvent>;

    /// Apply a partial update to an event.
    fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<()>;

    /// Delete an event.
    fn delete_event(&mut self, id: EventId) -> Result<()>;

    /// All calendar events.
    fn events(&self) -> &[CalendarEvent];

    // === Timer operations ===

    /// Create a stopped timer. Zero durations are rejected.
    fn add_timer(&mut self, name: String, duration: u64) -> Result<Timer>;

    /// Apply a partial update to a timer.
    fn update_timer(&mut self, id: TimerId, patch: TimerPatch) -> Result<()>;

    /// Delete a timer.
    fn delete_timer(&mut self, id: TimerId) -> Result<()>;

    /// Start a timer.
    fn start_timer(&mut self, id: TimerId) -> Result<()>;

    /// Pause a timer.
    fn pause_timer(&mut self, id: TimerId) -> Result<()>;

    /// Stop a timer and restore its full duration.
    fn reset_timer(&mut self, id: TimerId) -> Result<()>;

    /// Advance every running timer; returns the ones that just expired.
    fn tick_timers(&mut self, elapsed: u64) -> Vec<TimerId>;

    /// All timers.
    fn timers(&self) -> &[Timer];

    // === Settings ===

    /// Merge a settings update.
    fn update_settings(&mut self, patch: SettingsPatch);

    /// Current settings.
    fn settings(&self) -> &Settings;
}
