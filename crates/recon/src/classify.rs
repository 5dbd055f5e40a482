use keyroll_core::{ArchiveId, MasterRecordStore, RecordPayload, StagedTable};

use crate::diff;
use crate::error::ReconError;
use crate::model::{Classification, DisagreementRecord, Discrepancy, MatchRecord, NewRecord};

/// Classify every staged row of one archive against the master record set.
///
/// The output is a partition: each row lands in exactly one of the three
/// lists. Rows are looked up one key at a time, each against the master
/// store's current state; the pass as a whole does not require a single
/// transaction (the human decision step that follows can take arbitrary
/// wall-clock time anyway).
pub fn classify_table(
    archive_id: ArchiveId,
    file_name: &str,
    table: &StagedTable,
    key_column: usize,
    master: &dyn MasterRecordStore,
) -> Result<Classification, ReconError> {
    let mut out = Classification {
        columns: table.columns.clone(),
        ..Classification::default()
    };

    for row in &table.rows {
        // An empty key cell is not an error: the row is still processed,
        // it just can never match an existing record.
        let key = row
            .values
            .get(key_column)
            .filter(|v| !v.is_empty())
            .cloned();

        let Some(key) = key else {
            out.new_records.push(new_record(archive_id, file_name, row, None));
            continue;
        };

        let Some(existing) = master.record(&key)? else {
            out.new_records.push(new_record(archive_id, file_name, row, Some(key)));
            continue;
        };

        match RecordPayload::from_json(&existing.payload) {
            Ok(payload) => {
                let existing_values = payload.aligned_values(&table.columns);
                let discrepancies =
                    diff::discrepancies(&table.columns, &existing_values, &row.values);
                if discrepancies.is_empty() {
                    out.matches.push(MatchRecord {
                        archive_id,
                        file_name: file_name.to_string(),
                        sheet: row.sheet.clone(),
                        row_index: row.row_index,
                        key,
                        existing: existing_values,
                        incoming: row.values.clone(),
                        reviewed: false,
                    });
                } else {
                    out.disagreements.push(DisagreementRecord {
                        archive_id,
                        file_name: file_name.to_string(),
                        sheet: row.sheet.clone(),
                        row_index: row.row_index,
                        key,
                        existing: existing_values,
                        incoming: row.values.clone(),
                        discrepancies,
                        reviewed: false,
                    });
                }
            }
            Err(e) => {
                // Corrupt master payload: a full mismatch, not an abort.
                // One bad record must not take down the pass.
                tracing::warn!(key = %key, error = %e, "unreadable master payload");
                let existing_values = vec![String::new(); table.columns.len()];
                let discrepancies: Vec<Discrepancy> = table
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| Discrepancy {
                        column_index: i,
                        column: column.clone(),
                        existing: String::new(),
                        incoming: row.values.get(i).cloned().unwrap_or_default(),
                    })
                    .collect();
                out.disagreements.push(DisagreementRecord {
                    archive_id,
                    file_name: file_name.to_string(),
                    sheet: row.sheet.clone(),
                    row_index: row.row_index,
                    key,
                    existing: existing_values,
                    incoming: row.values.clone(),
                    discrepancies,
                    reviewed: false,
                });
            }
        }
    }

    Ok(out)
}

fn new_record(
    archive_id: ArchiveId,
    file_name: &str,
    row: &keyroll_core::IndexedRow,
    key: Option<String>,
) -> NewRecord {
    NewRecord {
        archive_id,
        file_name: file_name.to_string(),
        sheet: row.sheet.clone(),
        row_index: row.row_index,
        key,
        values: row.values.clone(),
        reviewed: false,
    }
}
