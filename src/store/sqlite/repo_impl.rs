//! NoteRepository implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{DayKey, Note, NoteId};
use crate::infra::ContentHash;
use crate::store::{NoteRepository, PersistenceError, PersistenceResult, WriteOp};
use chrono::DateTime;
use rusqlite::{OptionalExtension, Row, params};

const NOTE_COLUMNS: &str = "id, day, date, content";

type NoteRow = (String, String, String, Vec<u8>);

fn read_row(row: &Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_note((id, day, date, content): NoteRow) -> PersistenceResult<Note> {
    let id: NoteId = id
        .parse()
        .map_err(|e| PersistenceError::Corrupt(format!("invalid note id: {}", e)))?;
    let day: DayKey = day
        .parse()
        .map_err(|e| PersistenceError::Corrupt(format!("invalid day: {}", e)))?;
    let date = DateTime::parse_from_rfc3339(&date)
        .map_err(|e| PersistenceError::Corrupt(format!("invalid date '{}': {}", date, e)))?;
    Ok(Note::new(id, day, date, content))
}

impl NoteRepository for SqliteStore {
    fn find_by_day(&self, day: DayKey) -> PersistenceResult<Option<Note>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE day = ?"),
                [day.to_string()],
                read_row,
            )
            .optional()?;
        row.map(parse_note).transpose()
    }

    fn content_hash(&self, day: DayKey) -> PersistenceResult<Option<ContentHash>> {
        let hex: Option<String> = self
            .conn
            .query_row(
                "SELECT content_hash FROM notes WHERE day = ?",
                [day.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        hex.map(|h| {
            ContentHash::from_hex(&h)
                .map_err(|e| PersistenceError::Corrupt(format!("content hash for {}: {}", day, e)))
        })
        .transpose()
    }

    fn list_all(&self) -> PersistenceResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY day"))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(parse_note).collect()
    }

    fn list_days(&self) -> PersistenceResult<Vec<DayKey>> {
        let mut stmt = self.conn.prepare("SELECT day FROM notes ORDER BY day")?;
        let days = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        days.iter()
            .map(|d| {
                d.parse()
                    .map_err(|e| PersistenceError::Corrupt(format!("invalid day: {}", e)))
            })
            .collect()
    }

    fn apply(&mut self, ops: &[WriteOp]) -> PersistenceResult<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let tx = self.transaction()?;
        for op in ops {
            match op {
                WriteOp::Insert(note) => {
                    let hash = ContentHash::compute(note.content());
                    tx.execute(
                        "INSERT INTO notes (id, day, date, content, content_hash)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            note.id().to_string(),
                            note.day().to_string(),
                            note.date().to_rfc3339(),
                            note.content(),
                            hash.as_str(),
                        ],
                    )?;
                }
                WriteOp::Replace { day, content } => {
                    let hash = ContentHash::compute(content);
                    let rows = tx.execute(
                        "UPDATE notes SET content = ?1, content_hash = ?2 WHERE day = ?3",
                        params![content, hash.as_str(), day.to_string()],
                    )?;
                    if rows == 0 {
                        return Err(PersistenceError::MissingNote(*day));
                    }
                }
                WriteOp::Delete(day) => {
                    tx.execute("DELETE FROM notes WHERE day = ?", [day.to_string()])?;
                }
            }
        }
        tx.commit()
    }
}
