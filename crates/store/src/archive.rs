use chrono::{DateTime, Utc};
use rusqlite::params;

use keyroll_core::{ArchiveId, ArchiveRecord, ArchiveStore, StoreError};

use crate::{db_err, Database};

impl ArchiveStore for Database {
    fn create_archive(
        &self,
        file_name: &str,
        uploaded_by: &str,
        uploaded_at: DateTime<Utc>,
        file_path: &str,
    ) -> Result<ArchiveId, StoreError> {
        self.conn()
            .execute(
                "INSERT INTO archives (file_name, uploaded_by, uploaded_at, file_path)
                 VALUES (?1, ?2, ?3, ?4)",
                params![file_name, uploaded_by, uploaded_at.to_rfc3339(), file_path],
            )
            .map_err(db_err)?;
        let id = ArchiveId(self.conn().last_insert_rowid());
        tracing::debug!(archive = %id, file = file_name, "archive created");
        Ok(id)
    }

    fn archive(&self, id: ArchiveId) -> Result<Option<ArchiveRecord>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT archive_id, file_name, uploaded_by, uploaded_at, file_path
                 FROM archives WHERE archive_id = ?1",
            )
            .map_err(db_err)?;
        let mut rows = stmt
            .query_map(params![id.0], row_to_archive)
            .map_err(db_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(db_err)?)),
            None => Ok(None),
        }
    }

    fn archives(&self) -> Result<Vec<ArchiveRecord>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT archive_id, file_name, uploaded_by, uploaded_at, file_path
                 FROM archives ORDER BY archive_id",
            )
            .map_err(db_err)?;
        let rows = stmt.query_map([], row_to_archive).map_err(db_err)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(db_err)?);
        }
        Ok(out)
    }
}

fn row_to_archive(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArchiveRecord> {
    let uploaded_at: String = row.get(3)?;
    let uploaded_at = DateTime::parse_from_rfc3339(&uploaded_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default();
    Ok(ArchiveRecord {
        id: ArchiveId(row.get(0)?),
        file_name: row.get(1)?,
        uploaded_by: row.get(2)?,
        uploaded_at,
        file_path: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();
        let id = db
            .create_archive("roster.csv", "alice", now, "/tmp/roster.csv")
            .unwrap();

        let archive = db.archive(id).unwrap().unwrap();
        assert_eq!(archive.file_name, "roster.csv");
        assert_eq!(archive.uploaded_by, "alice");
        assert_eq!(archive.uploaded_at.timestamp(), now.timestamp());
    }

    #[test]
    fn ids_are_monotonic() {
        let db = Database::open_in_memory().unwrap();
        let a = db
            .create_archive("a.csv", "alice", Utc::now(), "/tmp/a.csv")
            .unwrap();
        let b = db
            .create_archive("b.csv", "alice", Utc::now(), "/tmp/b.csv")
            .unwrap();
        assert!(b > a);
        assert_eq!(db.archives().unwrap().len(), 2);
    }

    #[test]
    fn missing_archive_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.archive(ArchiveId(999)).unwrap().is_none());
    }
}
