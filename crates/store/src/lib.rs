//! `keyroll-store` — Embedded SQLite persistence for keyroll.
//!
//! One database file holds the three stores: archives, indexed (staged)
//! content, and master records. `Database` implements each store contract
//! from `keyroll-core`, so callers that only classify or only import can
//! depend on the narrower trait.

mod archive;
mod master;
mod schema;
mod staged;

use std::path::Path;

use rusqlite::Connection;

use keyroll_core::StoreError;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and apply the
    /// schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(db_err)?;
        schema::init(&conn)?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    /// In-memory database, used by tests and the `--db :memory:` escape
    /// hatch.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

pub(crate) fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
