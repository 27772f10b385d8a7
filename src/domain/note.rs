//! The stored note record.

use crate::domain::{DayKey, DecodeError, NoteId, RichDocument};
use chrono::{DateTime, FixedOffset};

/// A day's note as held by the store.
///
/// `date` is the first instant of `day` in the store's calendar; `content`
/// is the encoded [`RichDocument`]. Callers receive owned copies and never
/// a live handle into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    day: DayKey,
    date: DateTime<FixedOffset>,
    content: Vec<u8>,
}

impl Note {
    pub fn new(id: NoteId, day: DayKey, date: DateTime<FixedOffset>, content: Vec<u8>) -> Self {
        Self {
            id,
            day,
            date,
            content,
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the day this note belongs to.
    pub fn day(&self) -> DayKey {
        self.day
    }

    /// Returns the start-of-day timestamp.
    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    /// Returns the encoded rich-text content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Decodes the content into a document.
    pub fn document(&self) -> Result<RichDocument, DecodeError> {
        RichDocument::decode(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_decodes_content() {
        let doc = RichDocument::from_plain_text("Buy milk");
        let day = DayKey::from_ymd(2024, 1, 1).unwrap();
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let note = Note::new(NoteId::new(), day, date, doc.encode().unwrap());

        assert_eq!(note.day(), day);
        assert_eq!(note.document().unwrap().plain_text(), "Buy milk");
    }

    #[test]
    fn document_reports_corrupt_content() {
        let day = DayKey::from_ymd(2024, 1, 1).unwrap();
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let note = Note::new(NoteId::new(), day, date, b"garbage".to_vec());
        assert!(note.document().is_err());
    }
}
