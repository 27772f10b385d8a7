//! Editing session: one day's draft plus its autosave slot.

use super::{Autosave, Clock, SystemClock};
use crate::domain::{DayKey, RichDocument};
use crate::store::{NoteRepository, NoteStore, PersistenceResult};
use std::time::{Duration, Instant};

/// An open editor over one day's note.
///
/// Edits go to an in-memory draft and are written back through a single
/// `flush` path, reached from three places: the idle timer expiring
/// ([`tick`](Self::tick)), the selected day changing
/// ([`select_day`](Self::select_day)), and the editor closing
/// ([`close`](Self::close), or drop). A failed write keeps the draft and
/// leaves the write pending so it can be retried.
pub struct EditorSession<'s, R: NoteRepository, C: Clock = SystemClock> {
    store: &'s mut NoteStore<R>,
    clock: C,
    day: DayKey,
    draft: RichDocument,
    autosave: Autosave,
}

impl<'s, R: NoteRepository, C: Clock> EditorSession<'s, R, C> {
    /// Opens `day` for editing, loading its current content.
    pub fn open(
        store: &'s mut NoteStore<R>,
        clock: C,
        idle: Duration,
        day: DayKey,
    ) -> PersistenceResult<Self> {
        let draft = load(store, day)?;
        Ok(Self {
            store,
            clock,
            day,
            draft,
            autosave: Autosave::new(idle),
        })
    }

    /// The day being edited.
    pub fn day(&self) -> DayKey {
        self.day
    }

    /// The current in-memory document.
    pub fn draft(&self) -> &RichDocument {
        &self.draft
    }

    pub fn store(&self) -> &NoteStore<R> {
        self.store
    }

    /// True while an edit has not been written yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.is_pending()
    }

    /// When the pending autosave is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    /// Replaces the draft and restarts the idle timer.
    pub fn edit(&mut self, document: RichDocument) {
        if document == self.draft && !self.autosave.is_pending() {
            return;
        }
        self.draft = document.clone();
        self.autosave.schedule(self.day, document, self.clock.now());
    }

    /// Fires the autosave if the idle interval has passed.
    ///
    /// Returns whether the store changed.
    pub fn tick(&mut self) -> PersistenceResult<bool> {
        match self.autosave.take_due(self.clock.now()) {
            Some((day, document)) => self.flush(day, document),
            None => Ok(false),
        }
    }

    /// Switches to another day.
    ///
    /// Pending edits are written to the day being left before the new day
    /// is loaded. If that write fails the session stays on the old day.
    pub fn select_day(&mut self, day: DayKey) -> PersistenceResult<()> {
        if day == self.day {
            return Ok(());
        }
        if let Some((previous, document)) = self.autosave.take() {
            self.flush(previous, document)?;
        }
        self.draft = load(self.store, day)?;
        self.day = day;
        Ok(())
    }

    /// Writes any pending edit immediately, as when the editor goes away.
    pub fn close(&mut self) -> PersistenceResult<bool> {
        match self.autosave.take() {
            Some((day, document)) => self.flush(day, document),
            None => Ok(false),
        }
    }

    fn flush(&mut self, target: DayKey, document: RichDocument) -> PersistenceResult<bool> {
        match self.store.upsert(target, &document) {
            Ok(changed) => {
                if changed {
                    tracing::debug!(day = %target, "autosaved");
                }
                Ok(changed)
            }
            Err(err) => {
                tracing::warn!(day = %target, error = %err, "autosave failed, draft kept");
                if !self.autosave.is_pending() {
                    self.autosave.schedule(target, document, self.clock.now());
                }
                Err(err)
            }
        }
    }
}

impl<R: NoteRepository, C: Clock> Drop for EditorSession<'_, R, C> {
    fn drop(&mut self) {
        if let Some((day, document)) = self.autosave.take()
            && self.flush(day, document).is_err()
        {
            tracing::warn!(%day, "unsaved edits lost on close");
        }
    }
}

/// Reads a day's document; unreadable content opens as an empty draft.
fn load<R: NoteRepository>(store: &NoteStore<R>, day: DayKey) -> PersistenceResult<RichDocument> {
    let Some(note) = store.get(day)? else {
        return Ok(RichDocument::new());
    };
    match note.document() {
        Ok(document) => Ok(document),
        Err(err) => {
            tracing::warn!(%day, error = %err, "note content unreadable, opening empty");
            Ok(RichDocument::new())
        }
    }
}
