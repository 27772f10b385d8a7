//! Editing sessions with debounced autosave

mod autosave;
mod clock;
mod session;

pub use autosave::{Autosave, DEFAULT_IDLE};
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::EditorSession;
