//! NoteRepository trait, write operations and error types.

use crate::domain::{DayKey, Note};
use crate::infra::ContentHash;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the persistent note store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred while opening the store.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Note content could not be encoded for storage.
    #[error("failed to encode note content: {0}")]
    Encode(#[from] serde_json::Error),

    /// A replace targeted a day with no stored note.
    #[error("no stored note for {0}")]
    MissingNote(DayKey),

    /// A stored row could not be read back.
    #[error("corrupt row in note store: {0}")]
    Corrupt(String),
}

/// Result type for store operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A single mutation, applied as part of an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Stores a new note; its day must not already have one.
    Insert(Note),
    /// Replaces the content of the day's existing note, keeping its id.
    Replace { day: DayKey, content: Vec<u8> },
    /// Removes the day's note.
    Delete(DayKey),
}

impl WriteOp {
    pub fn day(&self) -> DayKey {
        match self {
            WriteOp::Insert(note) => note.day(),
            WriteOp::Replace { day, .. } | WriteOp::Delete(day) => *day,
        }
    }
}

/// Storage backend for notes keyed by day.
///
/// Implementations hold at most one note per day and apply each batch of
/// writes atomically: either every operation lands or none does.
pub trait NoteRepository {
    /// Retrieves the note for a day.
    fn find_by_day(&self, day: DayKey) -> PersistenceResult<Option<Note>>;

    /// Returns the stored content hash for a day, without loading the blob.
    fn content_hash(&self, day: DayKey) -> PersistenceResult<Option<ContentHash>>;

    /// Lists every stored note (order unspecified).
    fn list_all(&self) -> PersistenceResult<Vec<Note>>;

    /// Lists the days that have a note, ascending.
    fn list_days(&self) -> PersistenceResult<Vec<DayKey>>;

    /// Applies a batch of writes in one transaction.
    fn apply(&mut self, ops: &[WriteOp]) -> PersistenceResult<()>;
}
