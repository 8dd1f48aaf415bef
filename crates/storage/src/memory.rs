//! In-memory store implementation.
//!
//! Holds the whole dashboard state in a [`Snapshot`] and applies every
//! mutation in place. Nothing is written anywhere unless the caller exports
//! the snapshot explicitly.

use studydesk_core::{
    CalendarEvent, EventId, EventPatch, FileId, NewWorksheet, Settings, SettingsPatch, Time,
    Timer, TimerId, TimerPatch, Todo, TodoId, TodoPatch, Worksheet, WorksheetFile, WorksheetId,
    WorksheetPatch,
};
use tracing::debug;

use super::{Result, Snapshot, StorageError, Store};

/// Dashboard state kept entirely in memory.
pub struct MemoryStore {
    state: Snapshot,
    clock: fn() -> Time,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    /// Create a store seeded from a snapshot.
    pub fn from_snapshot(state: Snapshot) -> Self {
        Self {
            state,
            clock: chrono::Utc::now,
        }
    }

    /// Use a different clock for creation timestamps.
    pub fn with_clock(mut self, clock: fn() -> Time) -> Self {
        self.clock = clock;
        self
    }

    /// Borrow the current state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    /// Consume the store, returning its state.
    pub fn into_snapshot(self) -> Snapshot {
        self.state
    }

    fn now(&self) -> Time {
        (self.clock)()
    }

    fn worksheet_mut(&mut self, id: WorksheetId) -> Result<&mut Worksheet> {
        self.state
            .worksheets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("worksheet {}", id)))
    }

    fn todo_mut(&mut self, id: TodoId) -> Result<&mut Todo> {
        self.state
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("todo {}", id)))
    }

    fn event_mut(&mut self, id: EventId) -> Result<&mut CalendarEvent> {
        self.state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("event {}", id)))
    }

    fn timer_mut(&mut self, id: TimerId) -> Result<&mut Timer> {
        self.state
            .timers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("timer {}", id)))
    }

    /// Keep the worksheet's calendar entry in step with its title and due date.
    fn sync_worksheet_event(&mut self, id: WorksheetId) {
        let Some(ws) = self.state.worksheets.iter().find(|w| w.id == id) else {
            return;
        };
        let Some(due) = ws.due_date else {
            return;
        };
        let title = ws.title.clone();

        let mut linked = false;
        for event in self.state.events.iter_mut().filter(|e| e.worksheet_id == Some(id)) {
            event.title = title.clone();
            event.date = due;
            linked = true;
        }
        if !linked {
            self.state.events.push(CalendarEvent::for_worksheet(id, title, due));
        }
    }

    fn sync_todo_event(&mut self, id: TodoId) {
        let Some(todo) = self.state.todos.iter().find(|t| t.id == id) else {
            return;
        };
        let (title, due) = (todo.title.clone(), todo.due_date);

        for event in self.state.events.iter_mut().filter(|e| e.todo_id == Some(id)) {
            event.title = title.clone();
            event.date = due;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn add_worksheet(&mut self, new: NewWorksheet) -> Result<Worksheet> {
        if new.title.trim().is_empty() {
            return Err(StorageError::Invalid("worksheet title is empty".to_string()));
        }
        let mut ws = Worksheet::new(new);
        ws.created_at = self.now();
        let id = ws.id;
        self.state.worksheets.push(ws.clone());
        self.sync_worksheet_event(id);

        debug!("Added worksheet {} ({})", id, ws.title);
        Ok(ws)
    }

    fn update_worksheet(&mut self, id: WorksheetId, patch: WorksheetPatch) -> Result<()> {
        let touches_event = patch.due_date.is_some() || patch.title.is_some();
        self.worksheet_mut(id)?.apply(&patch);
        if touches_event {
            self.sync_worksheet_event(id);
        }
        Ok(())
    }

    fn delete_worksheet(&mut self, id: WorksheetId) -> Result<()> {
        let before = self.state.worksheets.len();
        self.state.worksheets.retain(|w| w.id != id);
        if self.state.worksheets.len() == before {
            return Err(StorageError::NotFound(format!("worksheet {}", id)));
        }
        self.state.events.retain(|e| e.worksheet_id != Some(id));
        debug!("Deleted worksheet {}", id);
        Ok(())
    }

    fn toggle_complete(&mut self, id: WorksheetId) -> Result<bool> {
        let ws = self.worksheet_mut(id)?;
        ws.completed = !ws.completed;
        Ok(ws.completed)
    }

    fn add_file(&mut self, worksheet_id: WorksheetId, file: WorksheetFile) -> Result<()> {
        self.worksheet_mut(worksheet_id)?.files.push(file);
        Ok(())
    }

    fn delete_file(&mut self, worksheet_id: WorksheetId, file_id: FileId) -> Result<()> {
        let ws = self.worksheet_mut(worksheet_id)?;
        let before = ws.files.len();
        ws.files.retain(|f| f.id != file_id);
        if ws.files.len() == before {
            return Err(StorageError::NotFound(format!("file {}", file_id)));
        }
        Ok(())
    }

    fn load_worksheet(&self, id: WorksheetId) -> Option<&Worksheet> {
        self.state.worksheets.iter().find(|w| w.id == id)
    }

    fn worksheets(&self) -> &[Worksheet] {
        &self.state.worksheets
    }

    fn add_todo(&mut self, title: String, due_date: Time, notes: Option<String>) -> Result<Todo> {
        if title.trim().is_empty() {
            return Err(StorageError::Invalid("todo title is empty".to_string()));
        }
        let mut todo = Todo::new(title, due_date);
        todo.notes = notes;
        todo.created_at = self.now();

        self.state
            .events
            .push(CalendarEvent::for_todo(todo.id, todo.title.clone(), due_date));
        self.state.todos.push(todo.clone());

        debug!("Added todo {} ({})", todo.id, todo.title);
        Ok(todo)
    }

    fn update_todo(&mut self, id: TodoId, patch: TodoPatch) -> Result<()> {
        let touches_event = patch.due_date.is_some() || patch.title.is_some();
        self.todo_mut(id)?.apply(&patch);
        if touches_event {
            self.sync_todo_event(id);
        }
        Ok(())
    }

    fn delete_todo(&mut self, id: TodoId) -> Result<()> {
        let before = self.state.todos.len();
        self.state.todos.retain(|t| t.id != id);
        if self.state.todos.len() == before {
            return Err(StorageError::NotFound(format!("todo {}", id)));
        }
        self.state.events.retain(|e| e.todo_id != Some(id));
        debug!("Deleted todo {}", id);
        Ok(())
    }

    fn toggle_todo_complete(&mut self, id: TodoId) -> Result<bool> {
        let todo = self.todo_mut(id)?;
        todo.completed = !todo.completed;
        Ok(todo.completed)
    }

    fn load_todo(&self, id: TodoId) -> Option<&Todo> {
        self.state.todos.iter().find(|t| t.id == id)
    }

    fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    fn add_event(&mut self, event: CalendarEvent) -> Result<CalendarEvent> {
        if self.state.events.iter().any(|e| e.id == event.id) {
            return Err(StorageError::Invalid(format!("duplicate event {}", event.id)));
        }
        self.state.events.push(event.clone());
        Ok(event)
    }

    fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<()> {
        self.event_mut(id)?.apply(&patch);
        Ok(())
    }

    fn delete_event(&mut self, id: EventId) -> Result<()> {
        let before = self.state.events.len();
        self.state.events.retain(|e| e.id != id);
        if self.state.events.len() == before {
            return Err(StorageError::NotFound(format!("event {}", id)));
        }
        Ok(())
    }

    fn events(&self) -> &[CalendarEvent] {
        &self.state.events
    }

    fn add_timer(&mut self, name: String, duration: u64) -> Result<Timer> {
        if duration == 0 {
            return Err(StorageError::Invalid("timer duration must be positive".to_string()));
        }
        let mut timer = Timer::new(name, duration);
        timer.created_at = self.now();
        self.state.timers.push(timer.clone());
        Ok(timer)
    }

    fn update_timer(&mut self, id: TimerId, patch: TimerPatch) -> Result<()> {
        if patch.duration == Some(0) {
            return Err(StorageError::Invalid("timer duration must be positive".to_string()));
        }
        self.timer_mut(id)?.apply(&patch);
        Ok(())
    }

    fn delete_timer(&mut self, id: TimerId) -> Result<()> {
        let before = self.state.timers.len();
        self.state.timers.retain(|t| t.id != id);
        if self.state.timers.len() == before {
            return Err(StorageError::NotFound(format!("timer {}", id)));
        }
        Ok(())
    }

    fn start_timer(&mut self, id: TimerId) -> Result<()> {
        self.timer_mut(id)?.start();
        Ok(())
    }

    fn pause_timer(&mut self, id: TimerId) -> Result<()> {
        self.timer_mut(id)?.pause();
        Ok(())
    }

    fn reset_timer(&mut self, id: TimerId) -> Result<()> {
        self.timer_mut(id)?.reset();
        Ok(())
    }

    fn tick_timers(&mut self, elapsed: u64) -> Vec<TimerId> {
        self.state
            .timers
            .iter_mut()
            .filter_map(|t| t.tick(elapsed).then_some(t.id))
            .collect()
    }

    fn timers(&self) -> &[Timer] {
        &self.state.timers
    }

    fn update_settings(&mut self, patch: SettingsPatch) {
        let now = self.now();
        self.state.settings.apply(patch, now);
    }

    fn settings(&self) -> &Settings {
        &self.state.settings
    }
}
