use keyroll_core::{MasterRecordStore, RecordPayload};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::model::{DisagreementRecord, MatchRecord, NewRecord};

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// The caller's resolution for one classified record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Leave the master record set untouched.
    Ignore,
    /// Overwrite the master record at the row's key with the staged
    /// values. A key that no longer exists is skipped, not an error.
    Update,
    /// Insert the staged values as a master record. An existing key
    /// becomes an overwrite (upsert), not a duplicate-key error.
    AddAsNew,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Update => write!(f, "update"),
            Self::AddAsNew => write!(f, "add_as_new"),
        }
    }
}

/// Per-row decisions for one reconciliation pass. May reference any
/// subset of the classified records; records absent here are untouched.
#[derive(Debug, Default)]
pub struct DecisionSet {
    /// The archive's column order, needed to rebuild payloads.
    pub columns: Vec<String>,
    pub new_records: Vec<(NewRecord, Decision)>,
    pub matches: Vec<(MatchRecord, Decision)>,
    pub disagreements: Vec<(DisagreementRecord, Decision)>,
}

impl DecisionSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.new_records.len() + self.matches.len() + self.disagreements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What `process_user_decisions` did, per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionReport {
    pub added: usize,
    pub updated: usize,
    pub ignored: usize,
    /// Decisions that had nothing to write to: an Update whose key
    /// vanished, or an Update/AddAsNew on a row with no derivable key.
    pub skipped: usize,
}

impl DecisionReport {
    pub fn total(&self) -> usize {
        self.added + self.updated + self.ignored + self.skipped
    }
}

impl std::fmt::Display for DecisionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} added, {} updated, {} ignored, {} skipped",
            self.added, self.updated, self.ignored, self.skipped
        )
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

enum Outcome {
    Added,
    Updated,
    Ignored,
    Skipped,
}

/// Apply every decision in the set to the master record set.
///
/// Records are processed independently; there is no cross-record
/// transaction. Each mutation is a single store statement. A store
/// failure aborts the remainder and surfaces to the caller — records
/// already applied keep their `reviewed` flag, so the caller can see how
/// far the pass got.
pub(crate) fn apply(
    master: &dyn MasterRecordStore,
    decisions: &mut DecisionSet,
) -> Result<DecisionReport, ReconError> {
    let columns = decisions.columns.clone();
    let mut report = DecisionReport::default();

    for (record, decision) in &mut decisions.new_records {
        let outcome = apply_one(master, &columns, record.key.as_deref(), &record.values, *decision)?;
        record.reviewed = true;
        tally(&mut report, outcome);
    }
    for (record, decision) in &mut decisions.matches {
        let outcome = apply_one(master, &columns, Some(&record.key), &record.incoming, *decision)?;
        record.reviewed = true;
        tally(&mut report, outcome);
    }
    for (record, decision) in &mut decisions.disagreements {
        let outcome = apply_one(master, &columns, Some(&record.key), &record.incoming, *decision)?;
        record.reviewed = true;
        tally(&mut report, outcome);
    }

    tracing::debug!(%report, "decisions applied");
    Ok(report)
}

fn apply_one(
    master: &dyn MasterRecordStore,
    columns: &[String],
    key: Option<&str>,
    values: &[String],
    decision: Decision,
) -> Result<Outcome, ReconError> {
    match decision {
        Decision::Ignore => Ok(Outcome::Ignored),
        Decision::Update => {
            let Some(key) = key else {
                return Ok(Outcome::Skipped);
            };
            let payload = RecordPayload::from_row(columns, values).to_json()?;
            if master.update_record(key, &payload)? {
                Ok(Outcome::Updated)
            } else {
                Ok(Outcome::Skipped)
            }
        }
        Decision::AddAsNew => {
            let Some(key) = key else {
                return Ok(Outcome::Skipped);
            };
            let payload = RecordPayload::from_row(columns, values).to_json()?;
            master.add_record(key, &payload)?;
            Ok(Outcome::Added)
        }
    }
}

fn tally(report: &mut DecisionReport, outcome: Outcome) {
    match outcome {
        Outcome::Added => report.added += 1,
        Outcome::Updated => report.updated += 1,
        Outcome::Ignored => report.ignored += 1,
        Outcome::Skipped => report.skipped += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{cols, new_rec, MemMaster};

    #[test]
    fn decision_parses_from_snake_case() {
        let d: Decision = serde_json::from_str("\"add_as_new\"").unwrap();
        assert_eq!(d, Decision::AddAsNew);
        assert_eq!(d.to_string(), "add_as_new");
    }

    #[test]
    fn ignore_is_a_no_op() {
        let master = MemMaster::default();
        master.put_fields("John", &[("Name", "John"), ("Age", "24")]);
        let before = master.dump();

        let mut set = DecisionSet::new(cols(&["Name", "Age"]));
        set.new_records.push((new_rec("Jane", &["Jane", "30"]), Decision::Ignore));
        let report = apply(&master, &mut set).unwrap();

        assert_eq!(report.ignored, 1);
        assert_eq!(report.total(), 1);
        assert_eq!(master.dump(), before);
        assert!(set.new_records[0].0.reviewed);
    }

    #[test]
    fn add_as_new_creates_exactly_one_record() {
        let master = MemMaster::default();
        let mut set = DecisionSet::new(cols(&["Name", "Age"]));
        set.new_records.push((new_rec("Jane", &["Jane", "30"]), Decision::AddAsNew));
        let report = apply(&master, &mut set).unwrap();

        assert_eq!(report.added, 1);
        let stored = master.get("Jane").unwrap();
        let payload = RecordPayload::from_json(&stored).unwrap();
        assert_eq!(
            payload.aligned_values(&cols(&["Name", "Age"])),
            vec!["Jane".to_string(), "30".to_string()]
        );
    }

    #[test]
    fn update_on_missing_key_is_skipped() {
        let master = MemMaster::default();
        let mut set = DecisionSet::new(cols(&["Name", "Age"]));
        set.new_records.push((new_rec("Ghost", &["Ghost", "1"]), Decision::Update));
        let report = apply(&master, &mut set).unwrap();

        assert_eq!(report.skipped, 1);
        assert!(master.get("Ghost").is_none());
    }

    #[test]
    fn decisions_on_keyless_rows_are_skipped() {
        let master = MemMaster::default();
        let mut set = DecisionSet::new(cols(&["Name", "Age"]));
        let mut keyless = new_rec("x", &["", "9"]);
        keyless.key = None;
        set.new_records.push((keyless.clone(), Decision::AddAsNew));
        set.new_records.push((keyless, Decision::Update));
        let report = apply(&master, &mut set).unwrap();

        assert_eq!(report.skipped, 2);
        assert!(master.dump().is_empty());
    }

    #[test]
    fn add_as_new_on_existing_key_overwrites() {
        let master = MemMaster::default();
        master.put_fields("John", &[("Name", "John"), ("Age", "24")]);

        let mut set = DecisionSet::new(cols(&["Name", "Age"]));
        set.new_records.push((new_rec("John", &["John", "99"]), Decision::AddAsNew));
        let report = apply(&master, &mut set).unwrap();

        assert_eq!(report.added, 1);
        let payload = RecordPayload::from_json(&master.get("John").unwrap()).unwrap();
        assert_eq!(payload.aligned_values(&cols(&["Name", "Age"]))[1], "99");
    }

    #[test]
    fn empty_decision_set_reports_nothing() {
        let master = MemMaster::default();
        let report = apply(&master, &mut DecisionSet::default()).unwrap();
        assert_eq!(report.total(), 0);
    }
}
