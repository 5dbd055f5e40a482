use std::fmt;

use keyroll_core::StoreError;

#[derive(Debug)]
pub enum LoadError {
    /// File read error (missing, unreadable).
    Read(String),
    /// The file's contents could not be parsed as tabular data.
    Parse(String),
    /// Extension not recognized as a tabular format.
    UnsupportedFormat(String),
    /// The file parsed but contains no header row.
    EmptyTable,
    /// Store failure while staging.
    Store(StoreError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported file format: '{ext}'"),
            Self::EmptyTable => write!(f, "file contains no tabular data"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
