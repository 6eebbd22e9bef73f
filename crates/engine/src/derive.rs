//! Derived business columns computed from price and quantity inputs.

use crate::cell::CellValue;
use crate::config::ColumnConfig;
use crate::error::ReportError;
use crate::table::Table;

/// Append shipped amount, correction quantity, ordered amount and shortage
/// amount (in that order).
///
/// Fails without touching the table when any of unit price, shipped
/// quantity or ordered quantity is missing. A derived column that already
/// exists is overwritten in place.
pub fn add_derived_columns(table: &mut Table, columns: &ColumnConfig) -> Result<(), ReportError> {
    let required = [&columns.unit_price, &columns.shipped_qty, &columns.ordered_qty];
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::MissingColumns { columns: missing });
    }

    let column_values = |name: &str| -> Vec<f64> {
        let col = table.column_index(name).unwrap_or_default();
        table.rows().iter().map(|row| row[col].as_number()).collect()
    };
    let price = column_values(&columns.unit_price);
    let shipped = column_values(&columns.shipped_qty);
    let ordered = column_values(&columns.ordered_qty);

    let mut shipped_amount = Vec::with_capacity(table.len());
    let mut correction = Vec::with_capacity(table.len());
    let mut ordered_amount = Vec::with_capacity(table.len());
    let mut shortage_amount = Vec::with_capacity(table.len());
    for i in 0..table.len() {
        let short = ordered[i] - shipped[i];
        shipped_amount.push(CellValue::Number(price[i] * shipped[i]));
        correction.push(CellValue::Number(short));
        ordered_amount.push(CellValue::Number(ordered[i] * price[i]));
        shortage_amount.push(CellValue::Number(short * price[i]));
    }

    table.set_column(&columns.shipped_amount, shipped_amount);
    table.set_column(&columns.correction_qty, correction);
    table.set_column(&columns.ordered_amount, ordered_amount);
    table.set_column(&columns.shortage_amount, shortage_amount);

    log::debug!("derived columns added to {} rows", table.len());
    Ok(())
}
