use keyroll_core::ArchiveId;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Classification results
// ---------------------------------------------------------------------------
//
// Derived views over (staged row × master record), recomputed per
// reconciliation pass and never persisted. All three shapes share the same
// base: where the row came from, the key it derived, and its field values.

/// A staged row whose derived key has no master record.
///
/// `key` is `None` when the key cell was empty — such rows are still
/// processed but can never match an existing record.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord {
    pub archive_id: ArchiveId,
    pub file_name: String,
    pub sheet: String,
    pub row_index: i64,
    pub key: Option<String>,
    pub values: Vec<String>,
    pub reviewed: bool,
}

/// A staged row whose key matched a master record with identical field
/// values. Still surfaced for an explicit decision, never silently
/// skipped.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub archive_id: ArchiveId,
    pub file_name: String,
    pub sheet: String,
    pub row_index: i64,
    pub key: String,
    pub existing: Vec<String>,
    pub incoming: Vec<String>,
    pub reviewed: bool,
}

/// A staged row whose key matched a master record but one or more field
/// values differ.
#[derive(Debug, Clone, Serialize)]
pub struct DisagreementRecord {
    pub archive_id: ArchiveId,
    pub file_name: String,
    pub sheet: String,
    pub row_index: i64,
    pub key: String,
    pub existing: Vec<String>,
    pub incoming: Vec<String>,
    pub discrepancies: Vec<Discrepancy>,
    pub reviewed: bool,
}

impl DisagreementRecord {
    /// Indices of the differing columns.
    pub fn column_indices(&self) -> Vec<usize> {
        self.discrepancies.iter().map(|d| d.column_index).collect()
    }

    /// Human-readable "column: old → new" lines, one per discrepancy.
    pub fn descriptions(&self) -> Vec<String> {
        self.discrepancies.iter().map(|d| d.to_string()).collect()
    }
}

/// One differing column between a staged row and its master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub column_index: usize,
    pub column: String,
    pub existing: String,
    pub incoming: String,
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} → {}", self.column, self.existing, self.incoming)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The classified view of one archive's staged content. A partition:
/// every staged row lands in exactly one of the three lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    pub columns: Vec<String>,
    pub new_records: Vec<NewRecord>,
    pub matches: Vec<MatchRecord>,
    pub disagreements: Vec<DisagreementRecord>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.new_records.len() + self.matches.len() + self.disagreements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrepancy_renders_old_arrow_new() {
        let d = Discrepancy {
            column_index: 1,
            column: "age".into(),
            existing: "24".into(),
            incoming: "25".into(),
        };
        assert_eq!(d.to_string(), "age: 24 → 25");
    }

    #[test]
    fn disagreement_exposes_indices_and_descriptions() {
        let record = DisagreementRecord {
            archive_id: ArchiveId(1),
            file_name: "roster.csv".into(),
            sheet: "Sheet1".into(),
            row_index: 2,
            key: "John".into(),
            existing: vec!["John".into(), "24".into()],
            incoming: vec!["John".into(), "25".into()],
            discrepancies: vec![Discrepancy {
                column_index: 1,
                column: "age".into(),
                existing: "24".into(),
                incoming: "25".into(),
            }],
            reviewed: false,
        };
        assert_eq!(record.column_indices(), vec![1]);
        assert_eq!(record.descriptions(), vec!["age: 24 → 25".to_string()]);
    }
}
