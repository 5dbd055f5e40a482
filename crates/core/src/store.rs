use std::fmt;

use chrono::{DateTime, Utc};

use crate::record::{ArchiveId, ArchiveRecord, MasterRecord, StagedTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StoreError {
    /// Underlying persistence layer failure (SQLite, filesystem). Fatal for
    /// the operation; the caller re-runs the classify → decide → apply
    /// cycle rather than retrying against possibly stale inputs.
    Backend(String),
    /// A payload could not be encoded or decoded.
    Encoding(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "store backend error: {msg}"),
            Self::Encoding(msg) => write!(f, "payload encoding error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

/// Uploaded-file metadata. Created once per import, read-only afterwards.
pub trait ArchiveStore {
    fn create_archive(
        &self,
        file_name: &str,
        uploaded_by: &str,
        uploaded_at: DateTime<Utc>,
        file_path: &str,
    ) -> Result<ArchiveId, StoreError>;

    /// `None` when the id was never created (or the archive predates the
    /// current database file) — not an error.
    fn archive(&self, id: ArchiveId) -> Result<Option<ArchiveRecord>, StoreError>;

    fn archives(&self) -> Result<Vec<ArchiveRecord>, StoreError>;
}

/// Per-cell staged content, partitioned by archive id.
pub trait StagedContentStore {
    /// Stage one sheet's rows. Persisted per cell; all rows of an archive
    /// share the header's column order.
    fn stage_rows(
        &self,
        archive_id: ArchiveId,
        sheet: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError>;

    /// All staged rows for an archive, grouped per row in column order.
    /// An unknown archive id yields an empty table.
    fn indexed_content(&self, archive_id: ArchiveId) -> Result<StagedTable, StoreError>;

    /// Bulk delete of one archive's staged content. Idempotent.
    fn delete_indexed_content(&self, archive_id: ArchiveId) -> Result<(), StoreError>;
}

/// The canonical record set, one record per unique key.
pub trait MasterRecordStore {
    fn record(&self, key: &str) -> Result<Option<MasterRecord>, StoreError>;

    /// Insert, or overwrite if the key already exists (upsert). A single
    /// atomic statement with respect to concurrent readers.
    fn add_record(&self, key: &str, payload: &str) -> Result<(), StoreError>;

    /// Overwrite an existing record. Returns whether a row existed and was
    /// updated; a vanished key is `false`, not an error.
    fn update_record(&self, key: &str, payload: &str) -> Result<bool, StoreError>;

    fn records(&self) -> Result<Vec<MasterRecord>, StoreError>;
}
