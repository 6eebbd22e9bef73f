use crate::cell::{CellStyle, CellValue};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub label: String,
    /// Hidden in the written workbook only; the column stays in the view.
    pub hidden: bool,
    /// Display width in character units
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// A row copied from the source table
    Data { source: usize, highlighted: bool },
    /// Synthetic summary row above a run of equal keys
    GroupHeader { key: CellValue, child_count: usize },
}

/// One body row of a sheet view (body row 0 sits under the column-header row).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<CellValue>,
    /// Style of every cell in the row
    pub style: CellStyle,
    /// Overrides `style` for the first cell (group header labels)
    pub lead_style: Option<CellStyle>,
}

impl SheetRow {
    pub fn data(source: usize, cells: Vec<CellValue>, highlighted: bool) -> Self {
        Self {
            kind: RowKind::Data { source, highlighted },
            cells,
            style: CellStyle::default(),
            lead_style: None,
        }
    }

    /// Header row carrying `label` in the first cell and blanks elsewhere.
    pub fn group_header(label: String, width: usize, key: CellValue, child_count: usize) -> Self {
        let mut cells = vec![CellValue::Empty; width.max(1)];
        cells[0] = CellValue::Text(label);
        Self {
            kind: RowKind::GroupHeader { key, child_count },
            cells,
            style: CellStyle::default(),
            lead_style: None,
        }
    }

    pub fn is_group_header(&self) -> bool {
        matches!(self.kind, RowKind::GroupHeader { .. })
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self.kind, RowKind::Data { highlighted: true, .. })
    }

    pub fn cell_style(&self, col: usize) -> &CellStyle {
        match (&self.lead_style, col) {
            (Some(lead), 0) => lead,
            _ => &self.style,
        }
    }
}

/// Collapsible row range in body coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineSpan {
    pub header_row: usize,
    pub first_child: usize,
    pub last_child: usize,
    pub level: u8,
}

/// A fully materialized, styled sheet ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetView {
    pub name: String,
    pub columns: Vec<SheetColumn>,
    pub header_style: CellStyle,
    pub rows: Vec<SheetRow>,
    pub outlines: Vec<OutlineSpan>,
    /// Outline summary rows sit above their children
    pub summary_above: bool,
    pub frozen_rows: usize,
    pub frozen_cols: usize,
}

impl SheetView {
    pub fn new(name: &str, columns: &[String]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|label| SheetColumn { label: label.clone(), hidden: false, width: 0.0 })
                .collect(),
            header_style: CellStyle::default(),
            rows: Vec::new(),
            outlines: Vec::new(),
            summary_above: true,
            frozen_rows: 0,
            frozen_cols: 0,
        }
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn group_header_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_group_header()).count()
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len() - self.group_header_count()
    }

    pub fn freeze(&mut self, rows: usize, cols: usize) {
        self.frozen_rows = rows;
        self.frozen_cols = cols;
    }
}

/// Plain data rows for `table`, one per source row, in order.
pub fn data_rows(table: &Table, highlights: &[bool]) -> Vec<SheetRow> {
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| SheetRow::data(i, row.clone(), highlights.get(i).copied().unwrap_or(false)))
        .collect()
}
