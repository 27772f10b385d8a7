//! Linear full-text search over decoded note text.

use crate::domain::Note;
use crate::store::{NoteRepository, NoteStore, PersistenceResult};

/// Number of characters shown in a preview before it is cut.
pub const PREVIEW_CHARS: usize = 100;

/// A matching note together with its decoded plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    note: Note,
    text: String,
}

impl SearchHit {
    pub fn new(note: Note, text: impl Into<String>) -> Self {
        Self {
            note,
            text: text.into(),
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Short preview of the note's text.
    pub fn preview(&self) -> String {
        preview(&self.text)
    }
}

/// Case-insensitive substring search across every stored note.
///
/// An empty query matches nothing. Hits come back in the store's
/// enumeration order. Notes whose content cannot be decoded are skipped.
pub fn search<R: NoteRepository>(
    store: &NoteStore<R>,
    query: &str,
) -> PersistenceResult<Vec<SearchHit>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let needle = query.to_lowercase();

    let mut hits = Vec::new();
    for note in store.all()? {
        let text = match note.document() {
            Ok(document) => document.plain_text(),
            Err(err) => {
                tracing::warn!(day = %note.day(), error = %err, "skipping unreadable note");
                continue;
            }
        };
        if text.to_lowercase().contains(&needle) {
            hits.push(SearchHit::new(note, text));
        }
    }

    tracing::debug!(query, hits = hits.len(), "search finished");
    Ok(hits)
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` appended when cut.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Calendar, DayKey, Image, NoteId, RichDocument, Style};
    use crate::store::{SqliteStore, WriteOp};
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn calendar() -> Calendar {
        Calendar::Fixed(FixedOffset::east_opt(0).unwrap())
    }

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn seeded() -> NoteStore {
        let mut store = NoteStore::open_in_memory(calendar()).unwrap();
        store
            .upsert(day("2024-01-01"), &RichDocument::from_plain_text("Buy milk"))
            .unwrap();
        store
            .upsert(day("2024-01-03"), &RichDocument::from_plain_text("Call Bob"))
            .unwrap();
        store
    }

    fn days(hits: &[SearchHit]) -> Vec<String> {
        hits.iter().map(|h| h.note().day().to_string()).collect()
    }

    #[test]
    fn finds_only_matching_day() {
        let hits = search(&seeded(), "bob").unwrap();
        assert_eq!(days(&hits), vec!["2024-01-03"]);
        assert_eq!(hits[0].text(), "Call Bob");
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(search(&seeded(), "xyz").unwrap().is_empty());
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(search(&seeded(), "").unwrap().is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(days(&search(&seeded(), "BUY").unwrap()), vec!["2024-01-01"]);
        assert_eq!(days(&search(&seeded(), "l").unwrap()).len(), 2);
    }

    #[test]
    fn matches_across_style_runs() {
        let mut store = NoteStore::open_in_memory(calendar()).unwrap();
        let mut document = RichDocument::new();
        document.push_text("Call ", Style::PLAIN);
        document.push_text("Bob", Style::bold());
        document.push_image(Image::new("photo.png", "image/png", vec![1, 2, 3]));
        store.upsert(day("2024-02-01"), &document).unwrap();

        let hits = search(&store, "call bob").unwrap();
        assert_eq!(days(&hits), vec!["2024-02-01"]);
    }

    #[test]
    fn unreadable_note_is_skipped() {
        let mut inner = SqliteStore::open_in_memory().unwrap();
        inner
            .apply(&[WriteOp::Insert(Note::new(
                NoteId::new(),
                day("2024-01-02"),
                calendar().start_of_day(day("2024-01-02")),
                b"bob, but garbled".to_vec(),
            ))])
            .unwrap();
        let mut store = NoteStore::new(inner, calendar());
        store
            .upsert(day("2024-01-03"), &RichDocument::from_plain_text("Call Bob"))
            .unwrap();

        assert_eq!(days(&search(&store, "bob").unwrap()), vec!["2024-01-03"]);
    }

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("Buy milk"), "Buy milk");
        assert_eq!(preview(&"a".repeat(100)), "a".repeat(100));
    }

    #[test]
    fn preview_cuts_long_text() {
        let text = "é".repeat(150);
        let cut = preview(&text);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 103);
    }
}
