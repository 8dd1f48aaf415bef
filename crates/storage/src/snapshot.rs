//! JSON snapshot import/export.
//!
//! A snapshot is the whole dashboard state as one JSON document. It exists so
//! state can be handed to and from the CLI; writes are plain overwrites with
//! no versioning or crash safety.

use std::path::Path;

use serde::{Deserialize, Serialize};
use studydesk_core::{CalendarEvent, Settings, Timer, Todo, Worksheet};
use tokio::fs;
use tracing::debug;

use super::Result;

/// Complete dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Study resources
    #[serde(default)]
    pub worksheets: Vec<Worksheet>,

    /// To-do tasks
    #[serde(default)]
    pub todos: Vec<Todo>,

    /// Calendar entries
    #[serde(default)]
    pub events: Vec<CalendarEvent>,

    /// Countdown timers
    #[serde(default)]
    pub timers: Vec<Timer>,

    /// User preferences
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    /// Read a snapshot. A missing file yields an empty snapshot.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(json) => {
                let snapshot: Snapshot = serde_json::from_str(&json)?;
                debug!(
                    "Loaded snapshot from {}: {} worksheets, {} todos",
                    path.display(),
                    snapshot.worksheets.len(),
                    snapshot.todos.len()
                );
                Ok(snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the snapshot as pretty-printed JSON, replacing any existing file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json.as_bytes()).await?;
        debug!("Saved snapshot to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StorageError, Store};
    use chrono::Utc;
    use studydesk_core::NewWorksheet;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::load(dir.path().join("absent.json")).await.unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = MemoryStore::new();
        store
            .add_worksheet(NewWorksheet {
                title: "Cell biology".to_string(),
                subject: "Biology".to_string(),
                due_date: Some(Utc::now()),
                ..Default::default()
            })
            .unwrap();
        store.add_todo("Flashcards".to_string(), Utc::now(), None).unwrap();
        store.into_snapshot().save(&path).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(loaded.worksheets.len(), 1);
        assert_eq!(loaded.todos.len(), 1);
        assert_eq!(loaded.events.len(), 2);
    }

    #[tokio::test]
    async fn test_partial_document_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{\"todos\": []}").await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert!(loaded.worksheets.is_empty());
        assert_eq!(loaded.settings, Default::default());
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
