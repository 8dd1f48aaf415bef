//! Worksheet model - a study resource with optional attachments.

use serde::{Deserialize, Serialize};
use crate::id::{FileId, WorksheetId};
use crate::item::StudyItem;
use crate::Time;

/// A study resource the user is working through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Unique identifier
    pub id: WorksheetId,

    /// Worksheet title
    pub title: String,

    /// Subject (e.g. "Mathematics")
    pub subject: String,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the worksheet is due
    #[serde(default)]
    pub due_date: Option<Time>,

    /// Reminder time
    #[serde(default)]
    pub reminder: Option<Time>,

    /// Notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Whether the worksheet is done
    pub completed: bool,

    /// When created
    pub created_at: Time,

    /// Attached files
    #[serde(default)]
    pub files: Vec<WorksheetFile>,
}

impl Worksheet {
    /// Create a new, incomplete worksheet stamped with the current time.
    pub fn new(new: NewWorksheet) -> Self {
        Self {
            id: WorksheetId::new(),
            title: new.title,
            subject: new.subject,
            tags: new.tags,
            due_date: new.due_date,
            reminder: new.reminder,
            notes: new.notes,
            completed: new.completed,
            created_at: chrono::Utc::now(),
            files: Vec::new(),
        }
    }

    /// Merge a partial update into this worksheet.
    pub fn apply(&mut self, patch: &WorksheetPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(subject) = &patch.subject {
            self.subject = subject.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(reminder) = patch.reminder {
            self.reminder = Some(reminder);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    /// Find an attached file.
    pub fn file(&self, id: FileId) -> Option<&WorksheetFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Total size of all attachments in bytes.
    pub fn attachment_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl StudyItem for Worksheet {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn created_at(&self) -> Time {
        self.created_at
    }
}

/// Fields supplied when creating a worksheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorksheet {
    /// Worksheet title
    pub title: String,
    /// Subject
    pub subject: String,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Due date
    #[serde(default)]
    pub due_date: Option<Time>,
    /// Reminder
    #[serde(default)]
    pub reminder: Option<Time>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Initial completion flag
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for a worksheet. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksheetPatch {
    /// New title
    pub title: Option<String>,
    /// New subject
    pub subject: Option<String>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
    /// New due date
    pub due_date: Option<Time>,
    /// New reminder
    pub reminder: Option<Time>,
    /// New notes
    pub notes: Option<String>,
    /// Completion flag
    pub completed: Option<bool>,
}

/// A file attached to a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetFile {
    /// Unique identifier
    pub id: FileId,

    /// Original file name
    pub name: String,

    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Size in bytes
    pub size: u64,

    /// Encoded content (data URL or base64)
    pub content: String,

    /// When the file was attached
    pub uploaded_at: Time,
}

impl WorksheetFile {
    /// Create a new attachment record.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: FileId::new(),
            name: name.into(),
            mime_type: mime_type.into(),
            size: content.len() as u64,
            content,
            uploaded_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Worksheet {
        Worksheet::new(NewWorksheet {
            title: "Integrals".to_string(),
            subject: "Mathematics".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_worksheet_defaults() {
        let ws = sample();
        assert!(!ws.completed);
        assert!(ws.files.is_empty());
        assert!(ws.due_date.is_none());
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut ws = sample();
        let due = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        ws.apply(&WorksheetPatch {
            due_date: Some(due),
            completed: Some(true),
            ..Default::default()
        });

        assert_eq!(ws.title, "Integrals");
        assert_eq!(ws.due_date, Some(due));
        assert!(ws.completed);
    }

    #[test]
    fn test_attachment_size() {
        let mut ws = sample();
        ws.files.push(WorksheetFile::new("a.txt", "text/plain", "hello"));
        ws.files.push(WorksheetFile::new("b.txt", "text/plain", "abc"));
        assert_eq!(ws.attachment_size(), 8);

        let id = ws.files[1].id;
        assert_eq!(ws.file(id).map(|f| f.name.as_str()), Some("b.txt"));
    }

    #[test]
    fn test_study_item_impl() {
        let mut ws = sample();
        ws.completed = true;
        assert!(ws.is_completed());
        assert_eq!(StudyItem::created_at(&ws), ws.created_at);
    }
}
