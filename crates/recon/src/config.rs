use serde::Deserialize;

use crate::error::ReconError;

/// Engine configuration. All fields have working defaults; an absent or
/// empty config means "key is the first column, compare everything".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub key: KeyConfig,
}

/// Which column carries the unique key.
///
/// Exactly one of `column` (header name) or `index` (zero-based position)
/// may be set; neither means the first column. A name that is missing
/// from an archive's header is an error at classify time, not a silent
/// fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyConfig {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.key.column.is_some() && self.key.index.is_some() {
            return Err(ReconError::ConfigValidation(
                "key.column and key.index are mutually exclusive".into(),
            ));
        }
        Ok(())
    }
}

impl KeyConfig {
    /// Resolve the key column against an archive's header.
    pub fn resolve(&self, columns: &[String]) -> Result<usize, ReconError> {
        match (&self.column, self.index) {
            (Some(_), Some(_)) => Err(ReconError::ConfigValidation(
                "key.column and key.index are mutually exclusive".into(),
            )),
            (Some(name), None) => columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| ReconError::KeyColumn { column: name.clone() }),
            (None, Some(index)) => {
                if index < columns.len() {
                    Ok(index)
                } else {
                    Err(ReconError::KeyIndex { index, width: columns.len() })
                }
            }
            (None, None) => Ok(0),
        }
    }
}
