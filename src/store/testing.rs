//! Test doubles for store failure paths.

use crate::domain::{DayKey, Note};
use crate::infra::ContentHash;
use crate::store::{NoteRepository, PersistenceError, PersistenceResult, SqliteStore, WriteOp};

/// Serves reads from a real store and refuses every write.
pub(crate) struct ReadOnly(pub SqliteStore);

impl NoteRepository for ReadOnly {
    fn find_by_day(&self, day: DayKey) -> PersistenceResult<Option<Note>> {
        self.0.find_by_day(day)
    }

    fn content_hash(&self, day: DayKey) -> PersistenceResult<Option<ContentHash>> {
        self.0.content_hash(day)
    }

    fn list_all(&self) -> PersistenceResult<Vec<Note>> {
        self.0.list_all()
    }

    fn list_days(&self) -> PersistenceResult<Vec<DayKey>> {
        self.0.list_days()
    }

    fn apply(&mut self, _ops: &[WriteOp]) -> PersistenceResult<()> {
        Err(PersistenceError::Corrupt("store is read-only".into()))
    }
}
