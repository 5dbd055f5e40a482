//! `keyroll classify` / `keyroll apply` / `keyroll cleanup`

use std::path::Path;

use keyroll_core::ArchiveId;
use keyroll_recon::{Classification, ReconConfig, ReconEngine};

use crate::decisions::DecisionFile;
use crate::{open_db, CliError};

pub fn cmd_classify(
    db_path: &Path,
    archive_id: i64,
    config: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let config = load_config(config)?;
    let engine = ReconEngine::with_config(&db, &db, &db, config);

    let out = engine.identify_matching_records(ArchiveId(archive_id))?;

    if json {
        let rendered = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::error(format!("JSON serialization error: {e}")))?;
        println!("{rendered}");
    } else {
        print_classification(archive_id, &out);
    }
    Ok(())
}

pub fn cmd_apply(
    db_path: &Path,
    archive_id: i64,
    decisions_path: &Path,
    config: Option<&Path>,
    cleanup: bool,
) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let config = load_config(config)?;
    let engine = ReconEngine::with_config(&db, &db, &db, config);

    let decisions_str = std::fs::read_to_string(decisions_path)
        .map_err(|e| CliError::error(format!("cannot read {}: {e}", decisions_path.display())))?;
    let file = DecisionFile::from_toml(&decisions_str)?;

    let out = engine.identify_matching_records(ArchiveId(archive_id))?;
    let mut set = file.resolve(&out)?;

    let report = engine.process_user_decisions(&mut set)?;
    println!("{report}");

    if cleanup {
        engine.cleanup_indexed_content(ArchiveId(archive_id))?;
        println!("staged content purged for archive {archive_id}");
    }
    Ok(())
}

pub fn cmd_cleanup(db_path: &Path, archive_id: i64) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let engine = ReconEngine::new(&db, &db, &db);
    engine.cleanup_indexed_content(ArchiveId(archive_id))?;
    println!("staged content purged for archive {archive_id}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match path {
        Some(path) => {
            let input = std::fs::read_to_string(path)
                .map_err(|e| CliError::error(format!("cannot read {}: {e}", path.display())))?;
            Ok(ReconConfig::from_toml(&input)?)
        }
        None => Ok(ReconConfig::default()),
    }
}

fn print_classification(archive_id: i64, out: &Classification) {
    let file_name = out
        .new_records
        .first()
        .map(|r| r.file_name.as_str())
        .or_else(|| out.matches.first().map(|r| r.file_name.as_str()))
        .or_else(|| out.disagreements.first().map(|r| r.file_name.as_str()))
        .unwrap_or("");
    let label = if file_name.is_empty() {
        format!("archive {archive_id}")
    } else {
        format!("{file_name} (archive {archive_id})")
    };

    println!(
        "{label}: {} rows — {} new, {} matched, {} disagreements",
        out.total(),
        out.new_records.len(),
        out.matches.len(),
        out.disagreements.len(),
    );

    if !out.new_records.is_empty() {
        println!("\nnew");
        for record in &out.new_records {
            println!(
                "  {}:{}  {}",
                record.sheet,
                record.row_index,
                record.values.join(" | ")
            );
        }
    }

    if !out.matches.is_empty() {
        println!("\nmatched");
        for record in &out.matches {
            println!(
                "  {}:{}  {}",
                record.sheet,
                record.row_index,
                record.incoming.join(" | ")
            );
        }
    }

    if !out.disagreements.is_empty() {
        println!("\ndisagreements");
        for record in &out.disagreements {
            println!(
                "  {}:{}  {} — {}",
                record.sheet,
                record.row_index,
                record.key,
                record.descriptions().join(", ")
            );
        }
    }
}
