use crate::core::types::CheckedRow;

/// Whether a checked row belongs in the mailed report.
pub fn matches(row: &CheckedRow) -> bool {
    row.notify().matches(row.result())
}

/// Rows whose notify policy is satisfied by their probe outcome, in input
/// order.
pub fn matched_rows(rows: &[CheckedRow]) -> Vec<&CheckedRow> {
    rows.iter().filter(|row| matches(row)).collect()
}
