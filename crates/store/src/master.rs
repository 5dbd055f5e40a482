use chrono::Utc;
use rusqlite::params;

use keyroll_core::{MasterRecord, MasterRecordStore, StoreError};

use crate::{db_err, Database};

impl MasterRecordStore for Database {
    fn record(&self, key: &str) -> Result<Option<MasterRecord>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT record_key, payload FROM master_records WHERE record_key = ?1")
            .map_err(db_err)?;
        let mut rows = stmt
            .query_map(params![key], |row| {
                Ok(MasterRecord {
                    key: row.get(0)?,
                    payload: row.get(1)?,
                })
            })
            .map_err(db_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(db_err)?)),
            None => Ok(None),
        }
    }

    fn add_record(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        // Upsert in one statement so concurrent readers never observe a
        // half-written record.
        self.conn()
            .execute(
                "INSERT INTO master_records (record_key, payload, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(record_key) DO UPDATE SET
                     payload = excluded.payload,
                     updated_at = excluded.updated_at",
                params![key, payload, Utc::now().to_rfc3339()],
            )
            .map_err(db_err)?;
        tracing::debug!(key, "master record added");
        Ok(())
    }

    fn update_record(&self, key: &str, payload: &str) -> Result<bool, StoreError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE master_records SET payload = ?2, updated_at = ?3
                 WHERE record_key = ?1",
                params![key, payload, Utc::now().to_rfc3339()],
            )
            .map_err(db_err)?;
        tracing::debug!(key, updated = changed > 0, "master record update");
        Ok(changed > 0)
    }

    fn records(&self) -> Result<Vec<MasterRecord>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT record_key, payload FROM master_records ORDER BY record_key")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(MasterRecord {
                    key: row.get(0)?,
                    payload: row.get(1)?,
                })
            })
            .map_err(db_err)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(db_err)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get() {
        let db = Database::open_in_memory().unwrap();
        db.add_record("John", "A").unwrap();
        let record = db.record("John").unwrap().unwrap();
        assert_eq!(record.payload, "A");
    }

    #[test]
    fn add_existing_key_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.add_record("John", "A").unwrap();
        db.add_record("John", "B").unwrap();
        assert_eq!(db.record("John").unwrap().unwrap().payload, "B");
        assert_eq!(db.records().unwrap().len(), 1);
    }

    #[test]
    fn update_existing_returns_true() {
        let db = Database::open_in_memory().unwrap();
        db.add_record("John", "A").unwrap();
        assert!(db.update_record("John", "B").unwrap());
        assert_eq!(db.record("John").unwrap().unwrap().payload, "B");
    }

    #[test]
    fn update_missing_key_is_skipped() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.update_record("Ghost", "B").unwrap());
        assert!(db.record("Ghost").unwrap().is_none());
    }

    #[test]
    fn records_sorted_by_key() {
        let db = Database::open_in_memory().unwrap();
        db.add_record("Jane", "J").unwrap();
        db.add_record("Adam", "A").unwrap();
        let keys: Vec<String> = db.records().unwrap().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["Adam".to_string(), "Jane".to_string()]);
    }
}
