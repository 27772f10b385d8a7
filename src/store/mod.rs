//! Persistent day-keyed note store

mod note_store;
mod repository;
mod schema;
mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

pub use note_store::{BatchSummary, NoteStore, StoreObserver};
pub use repository::{NoteRepository, PersistenceError, PersistenceResult, WriteOp};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
