//! Style descriptors, hidden columns and auto-width for a built sheet view.

use crate::cell::CellStyle;
use crate::classify::{classify_columns, ColumnClass};
use crate::config::StyleConfig;
use crate::sheet::{RowKind, SheetView};

/// Attach fonts, fills, hide flags and widths to `view`.
///
/// Runs after grouping so widths account for header labels. Cell values,
/// row order and column order are left as they are.
pub fn apply_styles(mut view: SheetView, style: &StyleConfig, hidden: &[String]) -> SheetView {
    let base = CellStyle::with_font(&style.font_name);
    let accent = style.accent_rgb();
    let highlight = style.highlight_rgb();

    view.header_style = base.clone().bold().filled(accent).sized(style.header_font_size);

    for row in &mut view.rows {
        match row.kind {
            RowKind::Data { highlighted: true, .. } => {
                row.style = base.clone().filled(highlight);
                row.lead_style = None;
            }
            RowKind::Data { highlighted: false, .. } => {
                row.style = base.clone();
                row.lead_style = None;
            }
            RowKind::GroupHeader { .. } => {
                row.style = base.clone();
                row.lead_style = Some(base.clone().bold().filled(accent));
            }
        }
    }

    let labels: Vec<String> = view.columns.iter().map(|c| c.label.clone()).collect();
    let classes = classify_columns(&labels, hidden);
    let widths = column_widths(&view, style.width_multiplier, style.width_margin);
    for ((column, class), width) in view.columns.iter_mut().zip(classes).zip(widths) {
        column.hidden = class == ColumnClass::Hidden;
        column.width = width;
    }

    log::debug!(
        "styled sheet '{}': {} rows, {} hidden columns",
        view.name,
        view.rows.len(),
        view.columns.iter().filter(|c| c.hidden).count()
    );
    view
}

/// Width per column: longest rendered text (header label included) in
/// characters, times `multiplier`, plus `margin`.
pub fn column_widths(view: &SheetView, multiplier: f64, margin: f64) -> Vec<f64> {
    let mut max_chars: Vec<usize> = view.columns.iter().map(|c| c.label.chars().count()).collect();
    for row in &view.rows {
        for (col, value) in row.cells.iter().enumerate().take(max_chars.len()) {
            max_chars[col] = max_chars[col].max(value.display().chars().count());
        }
    }
    max_chars
        .into_iter()
        .map(|chars| chars as f64 * multiplier + margin)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::group::render_grouped;
    use crate::sheet::data_rows;
    use crate::table::Table;

    fn table() -> Table {
        Table::new(
            vec!["商品名".into(), "金額".into(), "出荷数要訂正".into()],
            vec![
                vec!["りんご".into(), 120.0.into(), 1.0.into()],
                vec!["りんご".into(), 3.0.into(), 0.0.into()],
                vec!["Banana split".into(), 45.5.into(), CellValue::Empty],
            ],
        )
    }

    fn plain_view(highlights: &[bool]) -> SheetView {
        let t = table();
        let mut view = SheetView::new("Sheet1", t.columns());
        view.rows = data_rows(&t, highlights);
        view
    }

    #[test]
    fn header_row_is_bold_accented_and_sized() {
        let view = apply_styles(plain_view(&[]), &StyleConfig::default(), &[]);
        assert!(view.header_style.bold);
        assert_eq!(view.header_style.fill, Some(0xFFD580));
        assert_eq!(view.header_style.font_size, Some(12.0));
        assert_eq!(view.header_style.font_name.as_deref(), Some("Yu Gothic"));
    }

    #[test]
    fn every_cell_gets_display_font() {
        let t = table();
        let body = render_grouped(&t, "商品名", &[true, false, false], "合計").unwrap();
        let mut view = SheetView::new("商品名", t.columns());
        view.rows = body.rows;
        let view = apply_styles(view, &StyleConfig::default(), &[]);
        for row in &view.rows {
            for col in 0..row.cells.len() {
                assert_eq!(row.cell_style(col).font_name.as_deref(), Some("Yu Gothic"));
            }
        }
    }

    #[test]
    fn highlighted_rows_fill_every_cell() {
        let view = apply_styles(plain_view(&[true, false, false]), &StyleConfig::default(), &[]);
        for col in 0..3 {
            assert_eq!(view.rows[0].cell_style(col).fill, Some(0xFFFF00));
            assert_eq!(view.rows[1].cell_style(col).fill, None);
        }
    }

    #[test]
    fn group_header_label_cell_is_bold_and_accented() {
        let t = table();
        let body = render_grouped(&t, "商品名", &[], "合計").unwrap();
        let mut view = SheetView::new("商品名", t.columns());
        view.rows = body.rows;
        let view = apply_styles(view, &StyleConfig::default(), &[]);
        let header = &view.rows[0];
        assert!(header.cell_style(0).bold);
        assert_eq!(header.cell_style(0).fill, Some(0xFFD580));
        assert!(!header.cell_style(1).bold);
        assert_eq!(header.cell_style(1).fill, None);
    }

    #[test]
    fn hiding_only_flags_columns() {
        let before = plain_view(&[]);
        let view = apply_styles(before.clone(), &StyleConfig::default(), &["金額".to_string()]);
        let hidden: Vec<bool> = view.columns.iter().map(|c| c.hidden).collect();
        assert_eq!(hidden, vec![false, true, false]);
        assert_eq!(view.column_labels(), before.column_labels());
        assert_eq!(view.rows.len(), before.rows.len());
        for (a, b) in view.rows.iter().zip(&before.rows) {
            assert_eq!(a.cells, b.cells);
        }
    }

    #[test]
    fn widths_use_longest_text_with_margin() {
        let view = apply_styles(plain_view(&[]), &StyleConfig::default(), &[]);
        // "Banana split" = 12 chars, "出荷数要訂正" = 6 chars
        assert_eq!(view.columns[0].width, 12.0 * 1.5 + 2.0);
        assert_eq!(view.columns[1].width, 4.0 * 1.5 + 2.0);
        assert_eq!(view.columns[2].width, 6.0 * 1.5 + 2.0);
    }

    #[test]
    fn widths_include_group_labels() {
        let t = table();
        let body = render_grouped(&t, "商品名", &[], "合計").unwrap();
        let mut view = SheetView::new("商品名", t.columns());
        view.rows = body.rows;
        let widths = column_widths(&view, 1.0, 0.0);
        // "商品名: Banana split (合計: 1)"
        assert_eq!(widths[0], "商品名: Banana split (合計: 1)".chars().count() as f64);
    }
}
