//! Append-only journal with file-based persistence.
//!
//! The journal is a single pretty-printed JSON array so it stays readable
//! and editable by hand. Every append rewrites the whole document into a
//! temporary file next to the journal and atomically renames it over the
//! old one: after a crash the file holds either the previous or the new
//! document, never a mix. Writers are serialized with an exclusive lock on
//! a sidecar `.lock` file.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use fs2::FileExt;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::domain::Entry;

/// Errors raised by the journal store
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Entry text is empty")]
    EmptyText,

    #[error("Journal is corrupted ({path}): {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Journal writer task failed: {0}")]
    Task(String),
}

impl JournalError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File-backed, append-only journal
#[derive(Debug, Clone)]
pub struct JournalStore {
    /// Path to the journal JSON document
    path: PathBuf,

    /// Sidecar file used for the writer lock
    lock_path: PathBuf,
}

impl JournalStore {
    /// Journal at an explicit path (the file is created on first append)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name: OsString = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("journal"));
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        Self { path, lock_path }
    }

    /// Journal at the configured location (~/.mindlog/thoughts_log.json by default)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::journal_path()?))
    }

    /// Path to the journal document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry in chronological order.
    ///
    /// A missing journal is empty, not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read_all(&self) -> Result<Vec<Entry>, JournalError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| JournalError::io(&self.path, e))?
        {
            debug!("Journal does not exist yet");
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| JournalError::io(&self.path, e))?;

        parse_document(&self.path, &bytes)
    }

    /// Last `limit` entries, oldest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<Entry>, JournalError> {
        let mut entries = self.read_all().await?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }

    /// Durably append an entry after all stored entries.
    ///
    /// A corrupted journal is left untouched and the append fails.
    #[instrument(skip(self, entry), fields(path = %self.path.display(), mood = %entry.mood))]
    pub async fn append(&self, entry: &Entry) -> Result<(), JournalError> {
        if entry.text.trim().is_empty() {
            return Err(JournalError::EmptyText);
        }

        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        let entry = entry.clone();

        let count = tokio::task::spawn_blocking(move || append_blocking(&path, &lock_path, entry))
            .await
            .map_err(|e| JournalError::Task(e.to_string()))??;

        info!(entries = count, "Journal entry saved");
        Ok(())
    }
}

/// Read-modify-replace under the writer lock. Returns the new entry count.
fn append_blocking(path: &Path, lock_path: &Path, entry: Entry) -> Result<usize, JournalError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| JournalError::io(&dir, e))?;

    let lock = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(lock_path)
        .map_err(|e| JournalError::io(lock_path, e))?;
    lock.lock_exclusive()
        .map_err(|e| JournalError::io(lock_path, e))?;

    let mut entries = match std::fs::read(path) {
        Ok(bytes) => parse_document(path, &bytes)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(JournalError::io(path, e)),
    };
    entries.push(entry);

    let json = serde_json::to_vec_pretty(&entries)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| JournalError::io(&dir, e))?;
    tmp.write_all(&json)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| JournalError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| JournalError::io(path, e.error))?;

    // Released on drop as well; explicit so the lock never outlives the rename
    let _ = FileExt::unlock(&lock);

    Ok(entries.len())
}

fn parse_document(path: &Path, bytes: &[u8]) -> Result<Vec<Entry>, JournalError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(bytes).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Journal could not be parsed");
        JournalError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })
}
