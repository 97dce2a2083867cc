//! Transaction management utilities.
//!
//! Every write that must be atomic runs through
//! [`Database::with_immediate_transaction`], which takes `SQLite`'s reserved
//! lock up front so concurrent writers serialize instead of failing midway.

use std::time::Duration;

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

fn lock_error(err: rusqlite::Error, timeout: Duration) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                seconds: timeout.as_secs(),
            }
        }
        other => Error::Database(other),
    }
}

impl Database {
    /// Begins a `BEGIN IMMEDIATE` transaction.
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` if another writer held the lock for the whole
    /// busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let timeout = self.busy_timeout();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e, timeout))
    }

    /// Runs `f` inside an immediate transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back otherwise,
    /// so every write `f` made is applied together or not at all.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, `LockTimeout` if the lock could not be
    /// taken, or the commit error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lodge::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/lodge.db")).unwrap();
    /// let count = db
    ///     .with_immediate_transaction(|tx| {
    ///         Ok(Database::list_all_bookings(tx)?.len())
    ///     })
    ///     .unwrap();
    /// ```
    pub fn with_immediate_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let timeout = self.busy_timeout();
        let tx = self.begin_immediate()?;
        let value = f(&tx)?;
        tx.commit().map_err(|e| lock_error(e, timeout))?;
        Ok(value)
    }
}
