//! `keyroll import` / `keyroll archives`

use std::path::Path;

use keyroll_core::ArchiveStore;
use keyroll_io::LoadError;

use crate::exit_codes::EXIT_USAGE;
use crate::{open_db, CliError};

pub fn cmd_import(db_path: &Path, file: &Path, uploaded_by: &str) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let archive_id =
        keyroll_io::import_file(&db, &db, file, uploaded_by).map_err(load_err)?;
    println!("imported {} as archive {archive_id}", file.display());
    Ok(())
}

pub fn cmd_archives(db_path: &Path) -> Result<(), CliError> {
    let db = open_db(db_path)?;
    let archives = db.archives().map_err(|e| CliError::store(e.to_string()))?;

    if archives.is_empty() {
        println!("no archives imported");
        return Ok(());
    }

    println!("{:<6} {:<20} {:<12} FILE", "ID", "UPLOADED", "BY");
    for archive in archives {
        println!(
            "{:<6} {:<20} {:<12} {}",
            archive.id,
            archive.uploaded_at.format("%Y-%m-%d %H:%M"),
            archive.uploaded_by,
            archive.file_name,
        );
    }
    Ok(())
}

fn load_err(e: LoadError) -> CliError {
    match e {
        LoadError::UnsupportedFormat(_) | LoadError::EmptyTable => CliError {
            code: EXIT_USAGE,
            message: e.to_string(),
            hint: Some("supported formats: csv, tsv, xlsx, xls, xlsb, ods".into()),
        },
        LoadError::Store(inner) => CliError::store(inner.to_string()),
        other => CliError::error(other.to_string()),
    }
}
