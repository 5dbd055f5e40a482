use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

/// Store-generated identifier of one imported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveId(pub i64);

impl std::fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Metadata for one imported source file. Immutable after creation;
/// staged content references it by id but does not own it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub id: ArchiveId,
    pub file_name: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_path: String,
}

// ---------------------------------------------------------------------------
// Staged content
// ---------------------------------------------------------------------------

/// One staged row, grouped back from its per-cell entries.
///
/// `values` is positioned by the archive's column order; cells that were
/// never staged for a column come back as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedRow {
    pub sheet: String,
    pub row_index: i64,
    pub values: Vec<String>,
}

/// All staged rows for one archive, in the source header's column order.
///
/// Every row of one archive shares the same column order; the header is
/// captured once at index time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StagedTable {
    pub columns: Vec<String>,
    pub rows: Vec<IndexedRow>,
}

impl StagedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Master records
// ---------------------------------------------------------------------------

/// The canonical, long-lived record for one unique key.
///
/// `payload` is an opaque serialized field-value sequence; the store never
/// inspects it. Decoding (and the handling of payloads that fail to decode)
/// is the reconciliation engine's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub key: String,
    pub payload: String,
}
