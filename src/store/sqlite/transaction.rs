//! RAII transaction guard.

use crate::store::PersistenceResult;
use rusqlite::{Connection, Params};

/// A transaction that rolls back on drop unless `commit()` is called.
pub struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            finished: false,
        }
    }

    /// Executes a statement inside the transaction.
    pub fn execute(&self, sql: &str, params: impl Params) -> PersistenceResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Commits, consuming the guard.
    pub fn commit(mut self) -> PersistenceResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Errors are ignored here; the connection stays usable either way
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
