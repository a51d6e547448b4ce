use std::cell::RefCell;

use rusqlite::Connection;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::errors::Result;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Handle to the single underlying SQLite connection. The catalog is
/// synchronous and request-scoped, so the connection lives in a `RefCell`
/// and every operation runs inside `with_conn`; an insert and its
/// `last_insert_rowid` lookup therefore always share a session.
pub struct Database {
    conn: RefCell<Connection>,
}

impl Database {
    pub fn open(path: &str) -> Result<Self> {
        debug!(path, "opening catalog database");
        let conn = Connection::open(path)?;
        Ok(Database {
            conn: RefCell::new(conn),
        })
    }

    /// In-memory store, used by the tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database {
            conn: RefCell::new(conn),
        })
    }

    /// Opens the database named by the settings file. Missing settings
    /// surface as a configuration error before any connection is made.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::open(&config.database.path)
    }

    /// Runs `f` against the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.borrow();
        f(&conn)
    }

    /// Applies the bundled schema (idempotent).
    pub fn init_schema(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }
}
