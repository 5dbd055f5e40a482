use std::fmt;

use keyroll_core::StoreError;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (conflicting key settings, etc.).
    ConfigValidation(String),
    /// The configured key column name is not in the archive's header.
    KeyColumn { column: String },
    /// The configured key column index is past the archive's width.
    KeyIndex { index: usize, width: usize },
    /// Store failure. Fatal for the operation; the caller re-runs the
    /// classify → decide → apply cycle.
    Store(StoreError),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::KeyColumn { column } => {
                write!(f, "key column '{column}' not found in archive header")
            }
            Self::KeyIndex { index, width } => {
                write!(f, "key column index {index} out of range (archive has {width} columns)")
            }
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ReconError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
