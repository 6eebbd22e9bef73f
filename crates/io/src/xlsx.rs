// Report workbook export (xlsx only)
//
// Sheet views arrive fully built and styled; this module only maps them
// onto rust_xlsxwriter. Body rows are written below the column-header row,
// so every body coordinate is shifted down by one.

use std::path::Path;
use std::time::Instant;

use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook, Worksheet};
use shipalloc_engine::{CellStyle, CellValue, ReportWorkbook, SheetView};

/// Rows above the first body row (the column-header row)
const HEADER_ROWS: u32 = 1;

/// Result of an Excel export operation
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of sheets exported
    pub sheets_exported: usize,
    /// Total cells exported, column headers included
    pub cells_exported: usize,
    /// Outline row groups written
    pub groups_exported: usize,
    /// Columns written with the hidden flag
    pub hidden_columns_exported: usize,
    /// Export duration in milliseconds
    pub export_duration_ms: u128,
}

impl ExportResult {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!(
                "{} sheet{}",
                self.sheets_exported,
                if self.sheets_exported == 1 { "" } else { "s" }
            ),
            format!("{} cells", self.cells_exported),
        ];
        if self.groups_exported > 0 {
            parts.push(format!("{} groups", self.groups_exported));
        }
        if self.hidden_columns_exported > 0 {
            parts.push(format!("{} hidden columns", self.hidden_columns_exported));
        }
        parts.join(", ")
    }
}

/// Serialize a report workbook to xlsx bytes.
pub fn export_to_buffer(workbook: &ReportWorkbook) -> Result<(Vec<u8>, ExportResult), String> {
    let start_time = Instant::now();
    let mut result = ExportResult::default();

    let mut xlsx_workbook = build_workbook(workbook, &mut result)?;
    let bytes = xlsx_workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to serialize XLSX: {}", e))?;

    result.export_duration_ms = start_time.elapsed().as_millis();
    Ok((bytes, result))
}

/// Write a report workbook to an xlsx file at `path`.
pub fn export(workbook: &ReportWorkbook, path: &Path) -> Result<ExportResult, String> {
    let start_time = Instant::now();
    let mut result = ExportResult::default();

    let mut xlsx_workbook = build_workbook(workbook, &mut result)?;
    xlsx_workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    result.export_duration_ms = start_time.elapsed().as_millis();
    log::info!("wrote {} ({})", path.display(), result.summary());
    Ok(result)
}

fn build_workbook(
    workbook: &ReportWorkbook,
    result: &mut ExportResult,
) -> Result<XlsxWorkbook, String> {
    let mut xlsx_workbook = XlsxWorkbook::new();

    for sheet in &workbook.sheets {
        let worksheet = xlsx_workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| format!("Failed to create sheet '{}': {}", sheet.name, e))?;
        export_sheet(sheet, worksheet, result)?;
        result.sheets_exported += 1;
    }

    Ok(xlsx_workbook)
}

/// Export one sheet view: cells, hidden columns, widths, outline groups, frozen panes
fn export_sheet(
    sheet: &SheetView,
    worksheet: &mut Worksheet,
    result: &mut ExportResult,
) -> Result<(), String> {
    let header_format = build_excel_format(&sheet.header_style);
    for (col, column) in sheet.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, &column.label, &header_format)
            .map_err(|e| format!("Failed to write header ({}): {}", col, e))?;
        result.cells_exported += 1;
    }

    for (idx, row) in sheet.rows.iter().enumerate() {
        let row32 = idx as u32 + HEADER_ROWS;
        let row_format = build_excel_format(&row.style);
        let lead_format = row.lead_style.as_ref().map(build_excel_format);

        for (col, value) in row.cells.iter().enumerate() {
            let format = match (&lead_format, col) {
                (Some(lead), 0) => lead,
                _ => &row_format,
            };
            write_cell(worksheet, row32, col as u16, value, format)?;
            result.cells_exported += 1;
        }
    }

    for (col, column) in sheet.columns.iter().enumerate() {
        if column.width > 0.0 {
            worksheet
                .set_column_width(col as u16, column.width)
                .map_err(|e| format!("Failed to set column {} width: {}", col, e))?;
        }
        if column.hidden {
            worksheet
                .set_column_hidden(col as u16)
                .map_err(|e| format!("Failed to hide column {}: {}", col, e))?;
            result.hidden_columns_exported += 1;
        }
    }

    for span in &sheet.outlines {
        let first = span.first_child as u32 + HEADER_ROWS;
        let last = span.last_child as u32 + HEADER_ROWS;
        worksheet
            .group_rows(first, last)
            .map_err(|e| format!("Failed to group rows {}..{}: {}", first, last, e))?;
        result.groups_exported += 1;
    }
    worksheet.group_symbols_above(sheet.summary_above);

    if sheet.frozen_rows > 0 || sheet.frozen_cols > 0 {
        worksheet
            .set_freeze_panes(sheet.frozen_rows as u32, sheet.frozen_cols as u16)
            .map_err(|e| format!("Failed to set freeze panes: {}", e))?;
    }

    log::debug!(
        "sheet '{}': {} body rows, {} groups",
        sheet.name,
        sheet.rows.len(),
        sheet.outlines.len()
    );
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        CellValue::Empty => worksheet.write_blank(row, col, format),
        CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, format),
        CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format),
    }
    .map(|_| ())
    .map_err(|e| format!("Failed to write cell ({}, {}): {}", row, col, e))
}

/// Convert a style descriptor to a rust_xlsxwriter Format
fn build_excel_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if style.bold {
        format = format.set_bold();
    }
    if let Some(ref family) = style.font_name {
        format = format.set_font_name(family);
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(rgb) = style.fill {
        format = format.set_background_color(Color::RGB(rgb));
    }

    format
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_groups_and_hidden_columns() {
        let result = ExportResult {
            sheets_exported: 3,
            cells_exported: 120,
            groups_exported: 4,
            hidden_columns_exported: 2,
            export_duration_ms: 1,
        };
        assert_eq!(result.summary(), "3 sheets, 120 cells, 4 groups, 2 hidden columns");
    }

    #[test]
    fn test_summary_single_sheet() {
        let result = ExportResult { sheets_exported: 1, cells_exported: 2, ..Default::default() };
        assert_eq!(result.summary(), "1 sheet, 2 cells");
    }

    #[test]
    fn test_empty_workbook_still_serializes() {
        let mut sheet = SheetView::new("Empty", &[]);
        sheet.freeze(1, 1);
        let workbook = ReportWorkbook { sheets: vec![sheet], warnings: vec![] };
        let (bytes, result) = export_to_buffer(&workbook).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert_eq!(result.sheets_exported, 1);
        assert_eq!(result.cells_exported, 0);
    }
}
