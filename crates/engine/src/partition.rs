//! Sorting and splitting of tables by a key column.

use crate::error::ReportError;
use crate::table::Table;

/// Stable ascending sort by `key`, then move `key` to the first column.
///
/// Returns an empty table when `key` is absent; callers check for the
/// column first and record the degradation.
pub fn sort_and_promote(table: &Table, key: &str) -> Table {
    let Some(key_col) = table.column_index(key) else {
        return Table::empty();
    };

    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| table.rows()[a][key_col].sort_cmp(&table.rows()[b][key_col]));

    let mut col_order = Vec::with_capacity(table.columns().len());
    col_order.push(key_col);
    col_order.extend((0..table.columns().len()).filter(|&c| c != key_col));

    let columns = col_order.iter().map(|&c| table.columns()[c].clone()).collect();
    let rows = order
        .iter()
        .map(|&r| col_order.iter().map(|&c| table.rows()[r][c].clone()).collect())
        .collect();
    Table::new(columns, rows)
}

/// Split rows by whether the rendered `key` value starts with `prefix`.
///
/// Returns `(matching, non_matching)`, both in original row order.
pub fn split_by_prefix(
    table: &Table,
    key: &str,
    prefix: &str,
) -> Result<(Table, Table), ReportError> {
    let key_col = table
        .column_index(key)
        .ok_or_else(|| ReportError::MissingGroupColumn { column: key.to_string() })?;

    let (matching, non_matching): (Vec<usize>, Vec<usize>) =
        (0..table.len()).partition(|&r| table.rows()[r][key_col].display().starts_with(prefix));

    log::debug!(
        "split on '{key}' prefix '{prefix}': {} matching, {} other",
        matching.len(),
        non_matching.len()
    );
    Ok((table.select_rows(&matching), table.select_rows(&non_matching)))
}
