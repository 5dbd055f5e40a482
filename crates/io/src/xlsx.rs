// Excel file import (xlsx, xls, xlsb, ods)
//
// One-way conversion: every cell is flattened to the string form the
// reconciliation engine compares with. No formatting survives.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::{LoadError, Table, TabularFile};

/// Load every non-empty worksheet. The first row of each sheet is its
/// header. Sheets whose cells are all empty are dropped.
pub fn load(path: &Path) -> Result<TabularFile, LoadError> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| LoadError::Read(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::new();

    for sheet_name in &sheet_names {
        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => return Err(LoadError::Parse(format!("sheet '{sheet_name}': {e}"))),
        };

        let mut rows = range.rows().map(|row| {
            row.iter().map(cell_to_string).collect::<Vec<String>>()
        });

        let Some(columns) = rows.next() else {
            continue;
        };
        if columns.iter().all(|c| c.is_empty()) {
            continue;
        }

        let data: Vec<Vec<String>> = rows
            .filter(|row| row.iter().any(|v| !v.is_empty()))
            .collect();

        tracing::debug!(sheet = %sheet_name, rows = data.len(), "worksheet loaded");
        sheets.push(Table {
            name: sheet_name.clone(),
            columns: columns.iter().map(|c| c.trim().to_string()).collect(),
            rows: data,
        });
    }

    if sheets.is_empty() {
        return Err(LoadError::EmptyTable);
    }

    Ok(TabularFile { sheets })
}

/// Flatten one cell to the string the engine will compare. Whole-number
/// floats drop their fraction so "25" in a spreadsheet never reads back
/// as "25.0".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::Error(e) => format!("#{e:?}"),
        // Serial value; calamine doesn't expose the 1904 flag, and the
        // engine only ever compares the string form anyway.
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if serial.fract() == 0.0 {
                format!("{}", serial as i64)
            } else {
                serial.to_string()
            }
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(25.0)), "25");
        assert_eq!(cell_to_string(&Data::Float(-3.0)), "-3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
    }

    #[test]
    fn scalar_cells_flatten_to_strings() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("John".into())), "John");
        assert_eq!(cell_to_string(&Data::Int(30)), "30");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn missing_workbook_is_a_read_error() {
        assert!(matches!(
            load(Path::new("/nonexistent/roster.xlsx")),
            Err(LoadError::Read(_))
        ));
    }
}
