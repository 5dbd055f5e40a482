//! The decisions file: per-row resolutions for one reviewed archive.
//!
//! ```toml
//! [[decision]]
//! sheet = "Sheet1"   # optional; omit when row numbers are unambiguous
//! row = 2
//! action = "update"  # ignore | update | add_as_new
//! ```

use serde::Deserialize;

use keyroll_recon::{Classification, Decision, DecisionSet};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_UNKNOWN_ROW};
use crate::CliError;

#[derive(Debug, Default, Deserialize)]
pub struct DecisionFile {
    #[serde(default, rename = "decision")]
    pub decisions: Vec<DecisionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DecisionEntry {
    #[serde(default)]
    pub sheet: Option<String>,
    pub row: i64,
    pub action: Decision,
}

impl DecisionFile {
    pub fn from_toml(input: &str) -> Result<Self, CliError> {
        toml::from_str(input).map_err(|e| CliError {
            code: EXIT_INVALID_CONFIG,
            message: format!("decisions file: {e}"),
            hint: Some("expected [[decision]] tables with row and action".into()),
        })
    }

    /// Pair each entry with its classified record. Every entry must match
    /// exactly one staged row; records without an entry are left
    /// untouched.
    pub fn resolve(&self, classification: &Classification) -> Result<DecisionSet, CliError> {
        let mut set = DecisionSet::new(classification.columns.clone());

        for entry in &self.decisions {
            let matches_entry = |sheet: &str, row_index: i64| {
                row_index == entry.row
                    && entry.sheet.as_deref().map(|s| s == sheet).unwrap_or(true)
            };

            if let Some(record) = classification
                .new_records
                .iter()
                .find(|r| matches_entry(&r.sheet, r.row_index))
            {
                set.new_records.push((record.clone(), entry.action));
                continue;
            }
            if let Some(record) = classification
                .matches
                .iter()
                .find(|r| matches_entry(&r.sheet, r.row_index))
            {
                set.matches.push((record.clone(), entry.action));
                continue;
            }
            if let Some(record) = classification
                .disagreements
                .iter()
                .find(|r| matches_entry(&r.sheet, r.row_index))
            {
                set.disagreements.push((record.clone(), entry.action));
                continue;
            }

            return Err(CliError {
                code: EXIT_UNKNOWN_ROW,
                message: format!("decision references unknown row {}", entry.row),
                hint: Some("row numbers come from `keyroll classify`".into()),
            });
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyroll_core::ArchiveId;
    use keyroll_recon::NewRecord;

    fn classification_with_row(row_index: i64) -> Classification {
        Classification {
            columns: vec!["Name".into()],
            new_records: vec![NewRecord {
                archive_id: ArchiveId(1),
                file_name: "roster.csv".into(),
                sheet: "Sheet1".into(),
                row_index,
                key: Some("John".into()),
                values: vec!["John".into()],
                reviewed: false,
            }],
            matches: vec![],
            disagreements: vec![],
        }
    }

    #[test]
    fn parses_actions() {
        let file = DecisionFile::from_toml(
            "[[decision]]\nrow = 2\naction = \"add_as_new\"\n\n[[decision]]\nrow = 3\naction = \"ignore\"\n",
        )
        .unwrap();
        assert_eq!(file.decisions.len(), 2);
        assert_eq!(file.decisions[0].action, Decision::AddAsNew);
        assert_eq!(file.decisions[1].action, Decision::Ignore);
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(DecisionFile::from_toml("[[decision]]\nrow = 2\naction = \"merge\"\n").is_err());
    }

    #[test]
    fn resolves_against_classification() {
        let file = DecisionFile::from_toml("[[decision]]\nrow = 2\naction = \"add_as_new\"\n").unwrap();
        let set = file.resolve(&classification_with_row(2)).unwrap();
        assert_eq!(set.new_records.len(), 1);
        assert_eq!(set.new_records[0].1, Decision::AddAsNew);
    }

    #[test]
    fn unknown_row_is_an_error() {
        let file = DecisionFile::from_toml("[[decision]]\nrow = 9\naction = \"ignore\"\n").unwrap();
        let err = file.resolve(&classification_with_row(2)).unwrap_err();
        assert_eq!(err.code, EXIT_UNKNOWN_ROW);
    }

    #[test]
    fn sheet_filter_must_match() {
        let file = DecisionFile::from_toml(
            "[[decision]]\nsheet = \"Other\"\nrow = 2\naction = \"ignore\"\n",
        )
        .unwrap();
        assert!(file.resolve(&classification_with_row(2)).is_err());
    }

    #[test]
    fn empty_file_resolves_to_empty_set() {
        let file = DecisionFile::from_toml("").unwrap();
        let set = file.resolve(&classification_with_row(2)).unwrap();
        assert!(set.is_empty());
    }
}
