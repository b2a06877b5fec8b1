//! Document persistence: one JSON blob at a fixed path.
//!
//! Storage failures are never fatal. A missing or unreadable blob
//! degrades to "no prior state" and a failed write is logged and
//! swallowed; the worst outcome is an un-persisted in-memory document.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Document;

/// Errors that can occur while reading or writing the state blob.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to parse state file {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed slot for the persisted [`Document`].
#[derive(Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted document.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(&self) -> Result<Option<Document>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let doc = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Parse(self.path.clone(), e))?;
                Ok(Some(doc))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(self.path.clone(), e)),
        }
    }

    /// Writes the document, creating parent directories as needed.
    pub fn save(&self, doc: &Document) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StorageError::Io(dir.to_path_buf(), e))?;
        }
        let payload = serde_json::to_string(doc)?;
        fs::write(&self.path, payload).map_err(|e| StorageError::Io(self.path.clone(), e))
    }

    /// Removes the persisted state. Missing file counts as success.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(self.path.clone(), e)),
        }
    }

    /// Startup policy: a valid persisted document wins; otherwise
    /// (missing or unparseable, the latter logged) the demo document is
    /// seeded and persisted immediately.
    pub fn load_or_seed(&self, today: NaiveDate) -> Document {
        match self.load() {
            Ok(Some(doc)) => return doc,
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load state, starting fresh: {}", e),
        }
        let doc = Document::demo(today);
        self.persist(&doc);
        doc
    }

    /// Best-effort save: failure is logged, never raised.
    pub fn persist(&self, doc: &Document) {
        if let Err(e) = self.save(doc) {
            tracing::warn!("Failed to save state: {}", e);
        }
    }
}
