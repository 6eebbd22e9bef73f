//! Marks data rows whose correction quantity is positive.

use crate::table::Table;

/// Per-row highlight flags, indexed like `table.rows()`.
///
/// A row is flagged iff the correction column holds a number greater than
/// zero. Without the column nothing is flagged.
pub fn highlight_rows(table: &Table, correction_column: &str) -> Vec<bool> {
    let Some(col) = table.column_index(correction_column) else {
        log::debug!("no '{correction_column}' column, nothing to highlight");
        return vec![false; table.len()];
    };
    table.rows().iter().map(|row| row[col].is_positive_number()).collect()
}
