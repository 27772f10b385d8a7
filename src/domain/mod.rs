//! Core types: Note, NoteId (ULID), DayKey, RichDocument, month grid

mod day_key;
mod document;
mod month_grid;
mod note;
mod note_id;
pub mod style;

pub use day_key::{Calendar, DayKey, ParseCalendarError, ParseDayKeyError};
pub use document::{DecodeError, Image, OBJECT_REPLACEMENT, RichDocument, Run, Style};
pub use month_grid::{DayCell, GRID_CELLS, Month, MonthGrid, WEEKDAY_LABELS};
pub use note::Note;
pub use note_id::{NoteId, ParseNoteIdError};
