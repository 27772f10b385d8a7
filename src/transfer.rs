//! JSON interchange files for backing up and restoring the note set.
//!
//! A file is a JSON array of `{ "date": <RFC 3339>, "content": <base64> }`
//! records, where `content` is the note's encoded rich-text blob.

use crate::domain::{DecodeError, Note, RichDocument};
use crate::infra::{FsError, write_atomic};
use crate::store::{BatchSummary, NoteRepository, NoteStore, PersistenceError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while exporting notes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read notes: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Write(#[from] FsError),
}

/// Errors while importing notes. Any of them means nothing was imported.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a daybook export: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record {index} has unreadable content: {source}")]
    InvalidContent {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("failed to store imported notes: {0}")]
    Persistence(#[from] PersistenceError),
}

/// One note as it appears in an interchange file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub date: DateTime<FixedOffset>,
    #[serde(with = "base64_content")]
    pub content: Vec<u8>,
}

impl From<&Note> for TransferRecord {
    fn from(note: &Note) -> Self {
        Self {
            date: note.date(),
            content: note.content().to_vec(),
        }
    }
}

/// Serializes every stored note.
pub fn export_notes<R: NoteRepository>(store: &NoteStore<R>) -> Result<Vec<u8>, ExportError> {
    let records: Vec<TransferRecord> = store.all()?.iter().map(TransferRecord::from).collect();
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Writes an export file and returns where it landed.
///
/// When `target` is a directory the file is named with
/// [`default_export_filename`] inside it.
pub fn export_to_path<R: NoteRepository>(
    store: &NoteStore<R>,
    target: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(default_export_filename(now))
    } else {
        target.to_path_buf()
    };

    let bytes = export_notes(store)?;
    write_atomic(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "exported notes");
    Ok(path)
}

/// File name for an export taken at `now`, e.g.
/// `daybook-backup-2024-01-01T10-15-00Z.json`.
pub fn default_export_filename(now: DateTime<Utc>) -> String {
    format!("daybook-backup-{}.json", now.format("%Y-%m-%dT%H-%M-%SZ"))
}

/// Merges an interchange file into the store.
///
/// Each record lands on the day its date falls on in the store's calendar,
/// replacing whatever that day held. The whole file is validated before
/// anything is written, and the writes share one transaction.
pub fn import_bytes<R: NoteRepository>(
    store: &mut NoteStore<R>,
    bytes: &[u8],
) -> Result<BatchSummary, ImportError> {
    let records: Vec<TransferRecord> = serde_json::from_slice(bytes)?;

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let document = RichDocument::decode(&record.content)
            .map_err(|source| ImportError::InvalidContent { index, source })?;
        items.push((store.bucket(&record.date), document));
    }

    let summary = store.upsert_many(items)?;
    tracing::info!(
        records = records.len(),
        inserted = summary.inserted,
        replaced = summary.replaced,
        deleted = summary.deleted,
        unchanged = summary.unchanged,
        "imported notes"
    );
    Ok(summary)
}

/// Reads and imports the file at `path`.
pub fn import_from_path<R: NoteRepository>(
    store: &mut NoteStore<R>,
    path: &Path,
) -> Result<BatchSummary, ImportError> {
    let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_bytes(store, &bytes)
}

mod base64_content {
    use super::{Engine, STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
