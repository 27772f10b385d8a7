//! SQLite-backed note store.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed persistence for day notes.
///
/// Owns the database connection; all reads and writes go through the
/// [`NoteRepository`](crate::store::NoteRepository) implementation.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
