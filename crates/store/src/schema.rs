use rusqlite::Connection;

use keyroll_core::StoreError;

use crate::db_err;

const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS archives (
    archive_id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    uploaded_by TEXT NOT NULL,
    uploaded_at TEXT NOT NULL,       -- RFC 3339
    file_path TEXT NOT NULL
);

-- One row per staged cell. row_index is the source row number; row 1 is
-- the header, so data rows start at 2.
CREATE TABLE IF NOT EXISTS indexed_content (
    archive_id INTEGER NOT NULL,
    sheet_name TEXT NOT NULL,
    row_index INTEGER NOT NULL,
    col_index INTEGER NOT NULL,
    column_name TEXT NOT NULL,
    cell_value TEXT NOT NULL,
    PRIMARY KEY (archive_id, sheet_name, row_index, col_index)
);

CREATE INDEX IF NOT EXISTS idx_indexed_content_archive
    ON indexed_content (archive_id);

CREATE TABLE IF NOT EXISTS master_records (
    record_key TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL         -- RFC 3339
);
"#;

pub(crate) fn init(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(PRAGMAS).map_err(db_err)?;
    conn.execute_batch(SCHEMA).map_err(db_err)?;
    Ok(())
}
