use rusqlite::params;

use keyroll_core::{ArchiveId, IndexedRow, StagedContentStore, StagedTable, StoreError};

use crate::{db_err, Database};

impl StagedContentStore for Database {
    fn stage_rows(
        &self,
        archive_id: ArchiveId,
        sheet: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError> {
        let conn = self.conn();
        conn.execute("BEGIN IMMEDIATE", []).map_err(db_err)?;

        let result = (|| {
            let mut stmt = conn
                .prepare(
                    "INSERT OR REPLACE INTO indexed_content
                     (archive_id, sheet_name, row_index, col_index, column_name, cell_value)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(db_err)?;

            for (i, row) in rows.iter().enumerate() {
                // Source row numbers: the header occupies row 1.
                let row_index = i as i64 + 2;
                for (col_index, column) in columns.iter().enumerate() {
                    let value = row.get(col_index).map(String::as_str).unwrap_or("");
                    stmt.execute(params![
                        archive_id.0,
                        sheet,
                        row_index,
                        col_index as i64,
                        column,
                        value,
                    ])
                    .map_err(db_err)?;
                }
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", []).map_err(db_err)?;
                tracing::debug!(archive = %archive_id, sheet, rows = rows.len(), "rows staged");
                Ok(rows.len())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    fn indexed_content(&self, archive_id: ArchiveId) -> Result<StagedTable, StoreError> {
        let conn = self.conn();

        // Column order is shared by every row of the archive; it was
        // captured from the source header at index time.
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT col_index, column_name FROM indexed_content
                 WHERE archive_id = ?1 ORDER BY col_index",
            )
            .map_err(db_err)?;
        let mut columns: Vec<String> = Vec::new();
        let col_rows = stmt
            .query_map(params![archive_id.0], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(db_err)?;
        let mut last_index = -1i64;
        for col in col_rows {
            let (index, name) = col.map_err(db_err)?;
            if index != last_index {
                columns.push(name);
                last_index = index;
            }
        }

        let mut stmt = conn
            .prepare(
                "SELECT sheet_name, row_index, col_index, cell_value FROM indexed_content
                 WHERE archive_id = ?1 ORDER BY sheet_name, row_index, col_index",
            )
            .map_err(db_err)?;
        let cell_rows = stmt
            .query_map(params![archive_id.0], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(db_err)?;

        let mut rows: Vec<IndexedRow> = Vec::new();
        for cell in cell_rows {
            let (sheet, row_index, col_index, value) = cell.map_err(db_err)?;
            let needs_new = rows
                .last()
                .map(|r| r.sheet != sheet || r.row_index != row_index)
                .unwrap_or(true);
            if needs_new {
                rows.push(IndexedRow {
                    sheet,
                    row_index,
                    values: vec![String::new(); columns.len()],
                });
            }
            if let Some(row) = rows.last_mut() {
                let col_index = col_index as usize;
                if col_index < row.values.len() {
                    row.values[col_index] = value;
                }
            }
        }

        Ok(StagedTable { columns, rows })
    }

    fn delete_indexed_content(&self, archive_id: ArchiveId) -> Result<(), StoreError> {
        let deleted = self
            .conn()
            .execute(
                "DELETE FROM indexed_content WHERE archive_id = ?1",
                params![archive_id.0],
            )
            .map_err(db_err)?;
        tracing::debug!(archive = %archive_id, cells = deleted, "staged content deleted");
        Ok(())
    }
}
