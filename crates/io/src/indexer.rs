//! Import step: load a file, create its archive record, stage its cells.

use std::path::Path;

use chrono::Utc;

use keyroll_core::{ArchiveId, ArchiveStore, StagedContentStore};

use crate::{load_file, LoadError};

/// Import one tabular file: create an `ArchiveRecord` and stage every
/// cell of every sheet as indexed content.
///
/// Sheets whose header differs from the first sheet's are skipped with a
/// warning — all staged rows of one archive must share the archive's
/// column order.
pub fn import_file(
    archives: &dyn ArchiveStore,
    staged: &dyn StagedContentStore,
    path: &Path,
    uploaded_by: &str,
) -> Result<ArchiveId, LoadError> {
    let file = load_file(path)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let archive_id = archives.create_archive(
        &file_name,
        uploaded_by,
        Utc::now(),
        &path.to_string_lossy(),
    )?;

    let header = &file.sheets[0].columns;
    let mut staged_rows = 0usize;
    for sheet in &file.sheets {
        if &sheet.columns != header {
            tracing::warn!(
                sheet = %sheet.name,
                "header differs from the archive's column order, sheet skipped"
            );
            continue;
        }
        staged_rows += staged.stage_rows(archive_id, &sheet.name, &sheet.columns, &sheet.rows)?;
    }

    tracing::info!(archive = %archive_id, file = %file_name, rows = staged_rows, "file imported");
    Ok(archive_id)
}
