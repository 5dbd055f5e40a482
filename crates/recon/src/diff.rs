use crate::model::Discrepancy;

/// Indices where two aligned field-value sequences differ.
///
/// Comparison is case-sensitive, exact string equality. The sequences are
/// compared over the longer of the two lengths; a value present on one
/// side only counts as a difference against the empty string.
pub fn differing_indices(existing: &[String], incoming: &[String]) -> Vec<usize> {
    let width = existing.len().max(incoming.len());
    (0..width)
        .filter(|&i| {
            existing.get(i).map(String::as_str).unwrap_or("")
                != incoming.get(i).map(String::as_str).unwrap_or("")
        })
        .collect()
}

/// Full discrepancy records for the differing columns of one row pair.
pub fn discrepancies(
    columns: &[String],
    existing: &[String],
    incoming: &[String],
) -> Vec<Discrepancy> {
    differing_indices(existing, incoming)
        .into_iter()
        .map(|i| Discrepancy {
            column_index: i,
            column: columns.get(i).cloned().unwrap_or_default(),
            existing: existing.get(i).cloned().unwrap_or_default(),
            incoming: incoming.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}
