//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{DayCell, MonthGrid, Note};
use crate::search::{SearchHit, preview};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing or search output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub day: String,
    pub date: String,
    pub preview: String,
}

impl NoteListing {
    pub fn new(note: &Note, text: &str) -> Self {
        Self {
            id: note.id().to_string(),
            day: note.day().to_string(),
            date: note.date().to_rfc3339(),
            preview: preview(text),
        }
    }
}

impl From<&SearchHit> for NoteListing {
    fn from(hit: &SearchHit) -> Self {
        Self::new(hit.note(), hit.text())
    }
}

/// One day of a month grid.
#[derive(Debug, Serialize)]
pub struct DayListing {
    pub day: String,
    pub in_month: bool,
    pub has_note: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl From<&DayCell> for DayListing {
    fn from(cell: &DayCell) -> Self {
        Self {
            day: cell.day.to_string(),
            in_month: cell.in_month,
            has_note: cell.has_note,
            is_today: cell.is_today,
            is_selected: cell.is_selected,
        }
    }
}

/// A month grid, six weeks of seven days.
#[derive(Debug, Serialize)]
pub struct MonthListing {
    pub month: String,
    pub title: String,
    pub weeks: Vec<Vec<DayListing>>,
}

impl From<&MonthGrid> for MonthListing {
    fn from(grid: &MonthGrid) -> Self {
        Self {
            month: grid.month().to_string(),
            title: grid.month().title(),
            weeks: grid
                .weeks()
                .map(|week| week.iter().map(DayListing::from).collect())
                .collect(),
        }
    }
}
