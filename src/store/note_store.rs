//! Day-keyed note store with change notification.

use crate::domain::{Calendar, DayKey, Note, NoteId, RichDocument};
use crate::infra::ContentHash;
use crate::store::{NoteRepository, PersistenceResult, SqliteStore, WriteOp};
use chrono::{DateTime, TimeZone};
use std::collections::BTreeMap;
use std::path::Path;

/// Receives a payload-free signal after every real store mutation.
pub trait StoreObserver {
    fn store_changed(&self);
}

impl<F: Fn()> StoreObserver for F {
    fn store_changed(&self) {
        self()
    }
}

/// Counts of what a batch upsert did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub inserted: usize,
    pub replaced: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl BatchSummary {
    pub fn changed(&self) -> usize {
        self.inserted + self.replaced + self.deleted
    }
}

/// The note store: at most one rich-text note per calendar day.
///
/// Wraps a [`NoteRepository`] with the save rules editors rely on:
/// blank documents are never stored, unchanged saves are skipped, and
/// observers hear about every write that actually changed something.
/// A failed write leaves the previous state in place.
pub struct NoteStore<R: NoteRepository = SqliteStore> {
    repo: R,
    calendar: Calendar,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl NoteStore<SqliteStore> {
    /// Opens the SQLite store at `path`.
    pub fn open(path: &Path, calendar: Calendar) -> PersistenceResult<Self> {
        Ok(Self::new(SqliteStore::open(path)?, calendar))
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory(calendar: Calendar) -> PersistenceResult<Self> {
        Ok(Self::new(SqliteStore::open_in_memory()?, calendar))
    }
}

impl<R: NoteRepository> NoteStore<R> {
    pub fn new(repo: R, calendar: Calendar) -> Self {
        Self {
            repo,
            calendar,
            observers: Vec::new(),
        }
    }

    /// Returns the calendar used for day bucketing.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Maps a timestamp to its day key in this store's calendar.
    pub fn bucket<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> DayKey {
        self.calendar.bucket(timestamp)
    }

    /// Registers an observer for "store changed" events.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns the note for a day, if any.
    pub fn get(&self, day: DayKey) -> PersistenceResult<Option<Note>> {
        self.repo.find_by_day(day)
    }

    /// Returns every stored note, in no particular order.
    pub fn all(&self) -> PersistenceResult<Vec<Note>> {
        self.repo.list_all()
    }

    /// Returns the days that have notes, ascending.
    pub fn days(&self) -> PersistenceResult<Vec<DayKey>> {
        self.repo.list_days()
    }

    /// Saves `document` as the day's note.
    ///
    /// A blank document deletes the note instead. Returns whether anything
    /// was written; saving identical content is a no-op.
    pub fn upsert(&mut self, day: DayKey, document: &RichDocument) -> PersistenceResult<bool> {
        let content = encode_unless_blank(document)?;
        let ops: Vec<WriteOp> = self.plan(day, content)?.into_iter().collect();
        self.commit(&ops)
    }

    /// Removes the day's note. Returns whether one existed.
    pub fn delete(&mut self, day: DayKey) -> PersistenceResult<bool> {
        let ops: Vec<WriteOp> = self.plan(day, None)?.into_iter().collect();
        self.commit(&ops)
    }

    /// Upserts many days in one transaction.
    ///
    /// When a day appears more than once the last document wins. Observers
    /// are notified once for the whole batch.
    pub fn upsert_many<I>(&mut self, items: I) -> PersistenceResult<BatchSummary>
    where
        I: IntoIterator<Item = (DayKey, RichDocument)>,
    {
        let mut desired: BTreeMap<DayKey, Option<Vec<u8>>> = BTreeMap::new();
        for (day, document) in items {
            desired.insert(day, encode_unless_blank(&document)?);
        }

        let mut summary = BatchSummary::default();
        let mut ops = Vec::with_capacity(desired.len());
        for (day, content) in desired {
            match self.plan(day, content)? {
                Some(op) => {
                    match op {
                        WriteOp::Insert(_) => summary.inserted += 1,
                        WriteOp::Replace { .. } => summary.replaced += 1,
                        WriteOp::Delete(_) => summary.deleted += 1,
                    }
                    ops.push(op);
                }
                None => summary.unchanged += 1,
            }
        }

        self.commit(&ops)?;
        Ok(summary)
    }

    /// Works out the write, if any, that brings `day` to `content`.
    fn plan(&self, day: DayKey, content: Option<Vec<u8>>) -> PersistenceResult<Option<WriteOp>> {
        let current = self.repo.content_hash(day)?;
        let op = match (current, content) {
            (None, None) => None,
            (Some(_), None) => Some(WriteOp::Delete(day)),
            (None, Some(content)) => Some(WriteOp::Insert(Note::new(
                NoteId::new(),
                day,
                self.calendar.start_of_day(day),
                content,
            ))),
            (Some(hash), Some(content)) if hash == ContentHash::compute(&content) => None,
            (Some(_), Some(content)) => Some(WriteOp::Replace { day, content }),
        };
        Ok(op)
    }

    fn commit(&mut self, ops: &[WriteOp]) -> PersistenceResult<bool> {
        if ops.is_empty() {
            return Ok(false);
        }

        self.repo.apply(ops)?;
        for op in ops {
            match op {
                WriteOp::Insert(note) => {
                    tracing::debug!(day = %note.day(), id = %note.id(), "note created")
                }
                WriteOp::Replace { day, .. } => tracing::debug!(%day, "note replaced"),
                WriteOp::Delete(day) => tracing::debug!(%day, "note deleted"),
            }
        }

        for observer in &self.observers {
            observer.store_changed();
        }
        Ok(true)
    }
}

fn encode_unless_blank(document: &RichDocument) -> PersistenceResult<Option<Vec<u8>>> {
    if document.is_blank() {
        Ok(None)
    } else {
        Ok(Some(document.encode()?))
    }
}
