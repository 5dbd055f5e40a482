use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// One named field value inside a master record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// The serialized shape of a master record: an ordered field-value
/// sequence, encoded as a JSON array so the payload stays inspectable
/// in the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordPayload {
    pub fields: Vec<Field>,
}

impl RecordPayload {
    /// Build a payload from a staged row. Columns without a value (short
    /// row) are stored as empty strings so the column order is preserved.
    pub fn from_row(columns: &[String], values: &[String]) -> Self {
        let fields = columns
            .iter()
            .enumerate()
            .map(|(i, name)| Field {
                name: name.clone(),
                value: values.get(i).cloned().unwrap_or_default(),
            })
            .collect();
        Self { fields }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(|e| StoreError::Encoding(e.to_string()))
    }

    pub fn from_json(input: &str) -> Result<Self, StoreError> {
        serde_json::from_str(input).map_err(|e| StoreError::Encoding(e.to_string()))
    }

    /// Project the payload onto a column order.
    ///
    /// Fields are matched by column name first. A column with no named
    /// match falls back to the field stored at the same position, unless
    /// that field's name belongs to some other column. Columns with no
    /// match at all come back as empty strings.
    pub fn aligned_values(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                if let Some(field) = self.fields.iter().find(|f| &f.name == column) {
                    return field.value.clone();
                }
                match self.fields.get(i) {
                    Some(field) if !columns.contains(&field.name) => field.value.clone(),
                    _ => String::new(),
                }
            })
            .collect()
    }
}
