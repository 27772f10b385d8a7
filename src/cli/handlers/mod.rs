//! Command handlers for the CLI.

mod calendar;
mod day;
mod list;
mod transfer;


use anyhow::{Context, Result};
use clap::CommandFactory;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::config::Config;
use crate::cli::date_arg::parse_day;
use crate::cli::{Cli, CompletionsArgs};
use crate::domain::{Calendar, DayKey, RichDocument};
use crate::editor::{EditorSession, SystemClock};
use crate::store::{NoteRepository, NoteStore};

// Re-export public items
pub use calendar::handle_cal;
pub use day::{
    handle_attach, handle_edit, handle_rm, handle_show, handle_style, handle_write,
};
pub use list::{handle_list, handle_search};
pub use transfer::{handle_export, handle_import};

// Re-export for tests
#[cfg(test)]
pub(crate) use calendar::render_month;
#[cfg(test)]
pub(crate) use day::{EditorLauncher, edit_day, render_text};
#[cfg(test)]
pub(crate) use list::list_notes;

// ===========================================
// Shared Utilities
// ===========================================

/// Settings every handler resolves before touching the store.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store_path: PathBuf,
    pub calendar: Calendar,
    pub idle: Duration,
    pub editor: String,
}

impl AppContext {
    /// Resolves settings from the config file and CLI flags.
    pub fn new(config: &Config, cli_store: Option<&PathBuf>) -> Result<Self> {
        Ok(Self {
            store_path: config.store_path(cli_store),
            calendar: config.calendar()?,
            idle: config.autosave_idle(),
            editor: config.editor(),
        })
    }

    /// Opens the note store.
    pub fn open_store(&self) -> Result<NoteStore> {
        NoteStore::open(&self.store_path, self.calendar).with_context(|| {
            format!("failed to open note store at {}", self.store_path.display())
        })
    }

    /// Resolves a day argument against today's date in this calendar.
    pub fn day(&self, arg: &str) -> Result<DayKey> {
        parse_day(arg, self.calendar.today()).map_err(anyhow::Error::msg)
    }
}

/// Applies `change` to a day's document through an editing session and
/// closes it, so the write takes the same path as an interactive save.
///
/// Returns whether the store changed.
pub(crate) fn save_document<R, F>(
    store: &mut NoteStore<R>,
    day: DayKey,
    idle: Duration,
    change: F,
) -> Result<bool>
where
    R: NoteRepository,
    F: FnOnce(&RichDocument) -> RichDocument,
{
    let mut session = EditorSession::open(store, SystemClock, idle, day)
        .with_context(|| format!("failed to load note for {day}"))?;
    let updated = change(session.draft());
    session.edit(updated);
    session
        .close()
        .with_context(|| format!("failed to save note for {day}"))
}

/// Collapses a preview onto one line for tabular output.
pub(crate) fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "daybook", &mut std::io::stdout());
    Ok(())
}
