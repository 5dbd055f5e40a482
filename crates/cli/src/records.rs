//! `keyroll master`

use std::path::Path;

use keyroll_core::{MasterRecordStore, RecordPayload};

use crate::{open_db, CliError};

pub fn cmd_master(db_path: &Path, json: bool) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let records = db.records().map_err(|e| CliError::store(e.to_string()))?;

    if json {
        let rows: Vec<serde_json::Value> = records
            .iter()
            .map(|record| match RecordPayload::from_json(&record.payload) {
                Ok(payload) => serde_json::json!({
                    "key": record.key,
                    "fields": payload.fields,
                }),
                Err(_) => serde_json::json!({
                    "key": record.key,
                    "raw_payload": record.payload,
                }),
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::error(format!("JSON serialization error: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    if records.is_empty() {
        println!("no master records");
        return Ok(());
    }

    for record in records {
        match RecordPayload::from_json(&record.payload) {
            Ok(payload) => {
                let fields: Vec<String> = payload
                    .fields
                    .iter()
                    .map(|f| format!("{}={}", f.name, f.value))
                    .collect();
                println!("{}: {}", record.key, fields.join(", "));
            }
            // Unreadable payloads still list; classification will flag them.
            Err(_) => println!("{}: <unreadable payload>", record.key),
        }
    }
    Ok(())
}
