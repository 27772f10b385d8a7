//! The single-slot debounce timer behind autosave.

use crate::domain::{DayKey, RichDocument};
use std::time::{Duration, Instant};

/// Idle time after the last edit before a save fires.
pub const DEFAULT_IDLE: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
struct Pending {
    day: DayKey,
    document: RichDocument,
    due: Instant,
}

/// Debounce state for one editing session.
///
/// Holds at most one pending write. Scheduling again replaces it, which
/// both restarts the idle timer and coalesces the content to the latest
/// edit, so two timers can never race.
#[derive(Debug, Clone)]
pub struct Autosave {
    idle: Duration,
    pending: Option<Pending>,
}

impl Autosave {
    pub fn new(idle: Duration) -> Self {
        Self {
            idle,
            pending: None,
        }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Queues `document` for `day`, restarting the timer from `now`.
    pub fn schedule(&mut self, day: DayKey, document: RichDocument, now: Instant) {
        self.pending = Some(Pending {
            day,
            document,
            due: now + self.idle,
        });
    }

    /// True while a write is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending write fires, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Takes the pending write if its timer has expired.
    pub fn take_due(&mut self, now: Instant) -> Option<(DayKey, RichDocument)> {
        if self.deadline().is_some_and(|due| due <= now) {
            self.take()
        } else {
            None
        }
    }

    /// Takes the pending write regardless of its timer.
    pub fn take(&mut self) -> Option<(DayKey, RichDocument)> {
        self.pending.take().map(|p| (p.day, p.document))
    }
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE)
    }
}
