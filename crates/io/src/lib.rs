//! `keyroll-io` — Tabular file loading and the archive indexer.
//!
//! Loads CSV/TSV and Excel files into plain string tables (first row is
//! the header) and stages them as indexed content through the store
//! contracts in `keyroll-core`.

pub mod csv;
pub mod indexer;
pub mod xlsx;

mod error;

pub use error::LoadError;
pub use indexer::import_file;

use std::path::Path;

/// One loaded sheet: a header plus string rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A loaded file. CSV files carry exactly one sheet; Excel files carry
/// one per non-empty worksheet.
#[derive(Debug, Clone)]
pub struct TabularFile {
    pub sheets: Vec<Table>,
}

/// Load a tabular file, dispatching on the extension.
pub fn load_file(path: &Path) -> Result<TabularFile, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "tsv" | "txt" => {
            let table = csv::load(path)?;
            Ok(TabularFile { sheets: vec![table] })
        }
        "xlsx" | "xls" | "xlsb" | "ods" => xlsx::load(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("records.pdf")).unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(load_file(Path::new("records")).is_err());
    }
}
