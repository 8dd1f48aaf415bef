//! Todo model.

use serde::{Deserialize, Serialize};
use crate::id::TodoId;
use crate::item::StudyItem;
use crate::Time;

/// A to-do task with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,

    /// Todo title
    pub title: String,

    /// When it is due
    pub due_date: Time,

    /// Notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Whether the todo is done
    pub completed: bool,

    /// When created
    pub created_at: Time,
}

impl Todo {
    /// Create a new, incomplete todo stamped with the current time.
    pub fn new(title: impl Into<String>, due_date: Time) -> Self {
        Self {
            id: TodoId::new(),
            title: title.into(),
            due_date,
            notes: None,
            completed: false,
            created_at: chrono::Utc::now(),
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Merge a partial update into this todo.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    /// Whether the todo is still open past its due date.
    pub fn is_overdue(&self, now: Time) -> bool {
        !self.completed && self.due_date < now
    }
}

impl StudyItem for Todo {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn created_at(&self) -> Time {
        self.created_at
    }
}

/// Partial update for a todo. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub due_date: Option<Time>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_new_todo_is_open() {
        let todo = Todo::new("Read chapter 3", Utc::now());
        assert!(!todo.completed);
        assert!(todo.notes.is_none());
    }

    #[test]
    fn test_overdue() {
        let now = Utc::now();
        let mut todo = Todo::new("Essay", now - Duration::days(1));
        assert!(todo.is_overdue(now));

        todo.completed = true;
        assert!(!todo.is_overdue(now));
    }

    #[test]
    fn test_apply_patch() {
        let now = Utc::now();
        let mut todo = Todo::new("Essay", now).with_notes("draft");
        todo.apply(&TodoPatch {
            title: Some("Final essay".to_string()),
            ..Default::default()
        });
        assert_eq!(todo.title, "Final essay");
        assert_eq!(todo.notes.as_deref(), Some("draft"));
        assert_eq!(todo.due_date, now);
    }
}
