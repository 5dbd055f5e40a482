//! In-memory store fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use keyroll_core::{
    ArchiveId, ArchiveRecord, ArchiveStore, Field, IndexedRow, MasterRecord, MasterRecordStore,
    RecordPayload, StagedContentStore, StagedTable, StoreError,
};

use crate::model::NewRecord;

pub(crate) fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn table(columns: &[&str], rows: &[(&str, i64, &[&str])]) -> StagedTable {
    StagedTable {
        columns: cols(columns),
        rows: rows
            .iter()
            .map(|(sheet, row_index, values)| IndexedRow {
                sheet: sheet.to_string(),
                row_index: *row_index,
                values: values.iter().map(|s| s.to_string()).collect(),
            })
            .collect(),
    }
}

pub(crate) fn new_rec(key: &str, values: &[&str]) -> NewRecord {
    NewRecord {
        archive_id: ArchiveId(1),
        file_name: "roster.csv".into(),
        sheet: "Sheet1".into(),
        row_index: 2,
        key: Some(key.to_string()),
        values: values.iter().map(|s| s.to_string()).collect(),
        reviewed: false,
    }
}

// ---------------------------------------------------------------------------
// Master store fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct MemMaster {
    records: RefCell<BTreeMap<String, String>>,
}

impl MemMaster {
    pub(crate) fn put_raw(&self, key: &str, payload: &str) {
        self.records
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
    }

    pub(crate) fn put_fields(&self, key: &str, fields: &[(&str, &str)]) {
        let payload = RecordPayload {
            fields: fields
                .iter()
                .map(|(name, value)| Field {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        };
        self.put_raw(key, &payload.to_json().unwrap());
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    pub(crate) fn dump(&self) -> BTreeMap<String, String> {
        self.records.borrow().clone()
    }
}

impl MasterRecordStore for MemMaster {
    fn record(&self, key: &str) -> Result<Option<MasterRecord>, StoreError> {
        Ok(self.records.borrow().get(key).map(|payload| MasterRecord {
            key: key.to_string(),
            payload: payload.clone(),
        }))
    }

    fn add_record(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.put_raw(key, payload);
        Ok(())
    }

    fn update_record(&self, key: &str, payload: &str) -> Result<bool, StoreError> {
        let mut records = self.records.borrow_mut();
        if records.contains_key(key) {
            records.insert(key.to_string(), payload.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn records(&self) -> Result<Vec<MasterRecord>, StoreError> {
        Ok(self
            .records
            .borrow()
            .iter()
            .map(|(key, payload)| MasterRecord {
                key: key.clone(),
                payload: payload.clone(),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Staged content fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct MemStaged {
    tables: RefCell<HashMap<i64, StagedTable>>,
}

impl MemStaged {
    pub(crate) fn put_table(&self, archive_id: ArchiveId, table: StagedTable) {
        self.tables.borrow_mut().insert(archive_id.0, table);
    }

    pub(crate) fn has_content(&self, archive_id: ArchiveId) -> bool {
        self.tables
            .borrow()
            .get(&archive_id.0)
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }
}

impl StagedContentStore for MemStaged {
    fn stage_rows(
        &self,
        archive_id: ArchiveId,
        sheet: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError> {
        let mut tables = self.tables.borrow_mut();
        let entry = tables.entry(archive_id.0).or_default();
        entry.columns = columns.to_vec();
        for (i, values) in rows.iter().enumerate() {
            entry.rows.push(IndexedRow {
                sheet: sheet.to_string(),
                row_index: i as i64 + 2,
                values: values.clone(),
            });
        }
        Ok(rows.len())
    }

    fn indexed_content(&self, archive_id: ArchiveId) -> Result<StagedTable, StoreError> {
        Ok(self
            .tables
            .borrow()
            .get(&archive_id.0)
            .cloned()
            .unwrap_or_default())
    }

    fn delete_indexed_content(&self, archive_id: ArchiveId) -> Result<(), StoreError> {
        self.tables.borrow_mut().remove(&archive_id.0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Archive store fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct MemArchives {
    archives: RefCell<Vec<ArchiveRecord>>,
}

impl ArchiveStore for MemArchives {
    fn create_archive(
        &self,
        file_name: &str,
        uploaded_by: &str,
        uploaded_at: DateTime<Utc>,
        file_path: &str,
    ) -> Result<ArchiveId, StoreError> {
        let mut archives = self.archives.borrow_mut();
        let id = ArchiveId(archives.len() as i64 + 1);
        archives.push(ArchiveRecord {
            id,
            file_name: file_name.to_string(),
            uploaded_by: uploaded_by.to_string(),
            uploaded_at,
            file_path: file_path.to_string(),
        });
        Ok(id)
    }

    fn archive(&self, id: ArchiveId) -> Result<Option<ArchiveRecord>, StoreError> {
        Ok(self.archives.borrow().iter().find(|a| a.id == id).cloned())
    }

    fn archives(&self) -> Result<Vec<ArchiveRecord>, StoreError> {
        Ok(self.archives.borrow().clone())
    }
}
