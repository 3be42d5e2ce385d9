//! Client-local persistence of the current workspace selection.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which the selected workspace id is stored.
pub const SELECTION_KEY: &str = "postpilot-current-workspace";

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("failed to write selection state {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode selection state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Remembers which workspace was current across runs.
pub trait SelectionStore: Send + Sync {
    /// The stored id, or `None` when nothing usable is stored.
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`SelectionError`] if the selection cannot be persisted.
    fn save(&self, workspace_id: &str) -> Result<(), SelectionError>;

    /// # Errors
    ///
    /// Returns [`SelectionError`] if the selection cannot be persisted.
    fn clear(&self) -> Result<(), SelectionError>;
}

impl<T: SelectionStore + ?Sized> SelectionStore for std::sync::Arc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, workspace_id: &str) -> Result<(), SelectionError> {
        (**self).save(workspace_id)
    }

    fn clear(&self) -> Result<(), SelectionError> {
        (**self).clear()
    }
}

/// JSON state file, e.g. `{"postpilot-current-workspace": "<uuid>"}`.
///
/// Other keys in the file are preserved on write. A missing, unreadable or
/// malformed file reads as "no selection".
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Option<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read selection state");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "ignoring malformed selection state");
                None
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> SelectionError {
        SelectionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Replaces the file atomically via a temp file in the same directory.
    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SelectionError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let encoded = serde_json::to_vec_pretty(document)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&encoded).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Option<String> {
        self.read_document()?
            .get(SELECTION_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn save(&self, workspace_id: &str) -> Result<(), SelectionError> {
        let mut document = self.read_document().unwrap_or_default();
        document.insert(
            SELECTION_KEY.to_string(),
            Value::String(workspace_id.to_string()),
        );
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), SelectionError> {
        let Some(mut document) = self.read_document() else {
            return Ok(());
        };
        if document.remove(SELECTION_KEY).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

/// In-process store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selected: Mutex<Option<String>>,
}

impl MemorySelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(workspace_id: impl Into<String>) -> Self {
        Self {
            selected: Mutex::new(Some(workspace_id.into())),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Option<String> {
        self.selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, workspace_id: &str) -> Result<(), SelectionError> {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(workspace_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SelectionError> {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
