//! Report assembly: three sheet views per workbook, up to three workbooks
//! per upload.

use crate::config::ReportConfig;
use crate::derive::add_derived_columns;
use crate::error::ReportError;
use crate::group::render_grouped;
use crate::highlight::highlight_rows;
use crate::partition::{sort_and_promote, split_by_prefix};
use crate::sheet::{data_rows, SheetView};
use crate::style::apply_styles;
use crate::table::Table;

/// An ordered set of styled sheet views, ready for serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportWorkbook {
    pub sheets: Vec<SheetView>,
    /// Soft errors: views that were degraded rather than built as requested
    pub warnings: Vec<ReportError>,
}

impl ReportWorkbook {
    pub fn sheet(&self, name: &str) -> Option<&SheetView> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Which slice of the upload an artifact covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Full,
    Matching,
    NonMatching,
}

/// One workbook to be written under `file_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub source_rows: usize,
    pub workbook: ReportWorkbook,
}

/// Build one sheet: highlight, then group (when `group_by` is set), then style.
fn build_view(
    name: &str,
    table: &Table,
    group_by: Option<&str>,
    config: &ReportConfig,
    warnings: &mut Vec<ReportError>,
) -> SheetView {
    let highlights = highlight_rows(table, &config.columns.correction_qty);
    let mut view = SheetView::new(name, table.columns());

    match group_by {
        None => view.rows = data_rows(table, &highlights),
        Some(column) => {
            match render_grouped(table, column, &highlights, &config.sheets.total_label) {
                Ok(body) => {
                    view.rows = body.rows;
                    view.outlines = body.outlines;
                }
                Err(err) => {
                    log::warn!("sheet '{name}': {err}; writing ungrouped rows");
                    view.rows = data_rows(table, &highlights);
                    warnings.push(err);
                }
            }
        }
    }

    apply_styles(view, &config.style, &config.columns.hidden)
}

/// Sorted-and-grouped view on `key`, or an empty sheet if the table lacks it.
fn build_keyed_view(
    name: &str,
    table: &Table,
    key: &str,
    config: &ReportConfig,
    warnings: &mut Vec<ReportError>,
) -> SheetView {
    if !table.has_column(key) {
        log::warn!("sheet '{name}': column '{key}' not found; writing an empty sheet");
        warnings.push(ReportError::MissingGroupColumn { column: key.to_string() });
        let mut view = build_view(name, &Table::empty(), None, config, warnings);
        view.freeze(1, 1);
        return view;
    }

    let sorted = sort_and_promote(table, key);
    let mut view = build_view(name, &sorted, Some(key), config, warnings);
    view.freeze(1, 1);
    view
}

/// The three-sheet report for `table`: as-is, grouped by order number,
/// grouped by product name.
pub fn assemble_workbook(table: &Table, config: &ReportConfig) -> ReportWorkbook {
    let mut warnings = Vec::new();

    let mut raw = build_view(&config.sheets.raw, table, None, config, &mut warnings);
    raw.freeze(1, 0);

    let by_order = build_keyed_view(
        &config.sheets.by_order,
        table,
        &config.columns.order_no,
        config,
        &mut warnings,
    );
    let by_product = build_keyed_view(
        &config.sheets.by_product,
        table,
        &config.columns.product_name,
        config,
        &mut warnings,
    );

    ReportWorkbook { sheets: vec![raw, by_order, by_product], warnings }
}

/// Everything one upload produces.
///
/// Derived columns are computed once; a missing prerequisite aborts before
/// any artifact is built. When the product-code column exists, the rows are
/// also split by the configured prefix into two more artifacts.
pub fn build_upload(source: &Table, config: &ReportConfig) -> Result<Vec<Artifact>, ReportError> {
    let mut table = source.clone();
    add_derived_columns(&mut table, &config.columns)?;

    let mut artifacts = vec![Artifact {
        kind: ArtifactKind::Full,
        file_name: config.output.full.clone(),
        source_rows: table.len(),
        workbook: assemble_workbook(&table, config),
    }];
    log::info!("built '{}' from {} rows", config.output.full, table.len());

    match split_by_prefix(&table, &config.columns.product_code, &config.split.prefix) {
        Ok((matching, non_matching)) => {
            for (kind, file_name, part) in [
                (ArtifactKind::Matching, &config.output.matching, matching),
                (ArtifactKind::NonMatching, &config.output.non_matching, non_matching),
            ] {
                log::info!("built '{file_name}' from {} rows", part.len());
                artifacts.push(Artifact {
                    kind,
                    file_name: file_name.clone(),
                    source_rows: part.len(),
                    workbook: assemble_workbook(&part, config),
                });
            }
        }
        Err(err) => {
            log::warn!("{err}; cannot split the upload");
        }
    }

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::sheet::RowKind;

    /// One source row; `qty` is `[price, shipped, ordered]`.
    fn row(order: &str, code: f64, name: &str, qty: [f64; 3]) -> Vec<CellValue> {
        let warehouse = if order == "PO-1" { "西" } else { "東" };
        let [price, shipped, ordered] = qty;
        vec![
            order.into(),
            code.into(),
            name.into(),
            price.into(),
            shipped.into(),
            ordered.into(),
            warehouse.into(),
        ]
    }

    fn source() -> Table {
        let headers = ["相手先注文No", "商品CD", "商品名", "単価", "出荷数", "受注数", "倉庫名"];
        let rows = vec![
            row("PO-2", 15001.0, "ネジ", [10.0, 3.0, 5.0]),
            row("PO-1", 22001.0, "ボルト", [4.0, 2.0, 2.0]),
            row("PO-2", 15002.0, "ボルト", [4.0, 1.0, 1.0]),
        ];
        Table::new(headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn derived() -> Table {
        let mut t = source();
        add_derived_columns(&mut t, &ReportConfig::default().columns).unwrap();
        t
    }

    #[test]
    fn workbook_has_three_named_sheets() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        assert_eq!(wb.sheet_names(), vec!["Sheet1", "相手先注文", "商品名"]);
        assert!(wb.warnings.is_empty());
    }

    #[test]
    fn raw_sheet_keeps_order_and_is_not_grouped() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        let raw = wb.sheet("Sheet1").unwrap();
        assert_eq!(raw.rows.len(), 3);
        assert!(raw.outlines.is_empty());
        assert_eq!(raw.rows[0].cells[0], CellValue::text("PO-2"));
        assert_eq!((raw.frozen_rows, raw.frozen_cols), (1, 0));
    }

    #[test]
    fn order_sheet_is_sorted_promoted_and_grouped() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        let sheet = wb.sheet("相手先注文").unwrap();
        assert_eq!(sheet.columns[0].label, "相手先注文No");
        assert_eq!(sheet.rows.len(), 5);
        assert_eq!(sheet.rows[0].cells[0], CellValue::text("相手先注文No: PO-1 (合計: 1)"));
        assert_eq!(sheet.rows[2].cells[0], CellValue::text("相手先注文No: PO-2 (合計: 2)"));
        assert_eq!(sheet.outlines.len(), 2);
        assert_eq!((sheet.frozen_rows, sheet.frozen_cols), (1, 1));
        assert!(sheet.summary_above);
    }

    #[test]
    fn product_sheet_groups_by_product_name() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        let sheet = wb.sheet("商品名").unwrap();
        assert_eq!(sheet.columns[0].label, "商品名");
        assert_eq!(sheet.group_header_count(), 2);
        assert_eq!(sheet.data_row_count(), 3);
    }

    #[test]
    fn correction_rows_are_highlighted_in_every_sheet() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        for sheet in &wb.sheets {
            let highlighted = sheet.rows.iter().filter(|r| r.is_highlighted()).count();
            assert_eq!(highlighted, 1, "sheet {}", sheet.name);
        }
    }

    #[test]
    fn reference_columns_are_hidden() {
        let wb = assemble_workbook(&derived(), &ReportConfig::default());
        for sheet in &wb.sheets {
            let hidden: Vec<&str> = sheet
                .columns
                .iter()
                .filter(|c| c.hidden)
                .map(|c| c.label.as_str())
                .collect();
            assert_eq!(hidden, vec!["倉庫名"]);
        }
    }

    #[test]
    fn missing_group_key_degrades_one_sheet() {
        let mut config = ReportConfig::default();
        config.columns.product_name = "品名".into();
        let wb = assemble_workbook(&derived(), &config);

        let sheet = wb.sheet("商品名").unwrap();
        assert!(sheet.rows.is_empty());
        assert!(sheet.columns.is_empty());
        assert_eq!(
            wb.warnings,
            vec![ReportError::MissingGroupColumn { column: "品名".into() }]
        );
        assert_eq!(wb.sheet("相手先注文").unwrap().group_header_count(), 2);
    }

    #[test]
    fn upload_builds_full_and_split_artifacts() {
        let artifacts = build_upload(&source(), &ReportConfig::default()).unwrap();
        let summary: Vec<(ArtifactKind, &str, usize)> = artifacts
            .iter()
            .map(|a| (a.kind, a.file_name.as_str(), a.source_rows))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ArtifactKind::Full, "出荷在庫引当.xlsx", 3),
                (ArtifactKind::Matching, "出荷在庫引当_4251.xlsx", 2),
                (ArtifactKind::NonMatching, "出荷在庫引当_9052.xlsx", 1),
            ]
        );
    }

    #[test]
    fn upload_without_product_code_builds_full_only() {
        let mut config = ReportConfig::default();
        config.columns.product_code = "SKU".into();
        let artifacts = build_upload(&source(), &config).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].kind, ArtifactKind::Full);
    }

    #[test]
    fn upload_aborts_on_missing_required_columns() {
        let mut config = ReportConfig::default();
        config.columns.unit_price = "価格".into();
        let err = build_upload(&source(), &config).unwrap_err();
        assert_eq!(err, ReportError::MissingColumns { columns: vec!["価格".into()] });
    }

    #[test]
    fn partitions_are_grouped_independently() {
        let artifacts = build_upload(&source(), &ReportConfig::default()).unwrap();
        let matching = &artifacts[1].workbook;
        let by_order = matching.sheet("相手先注文").unwrap();
        assert_eq!(by_order.group_header_count(), 1);
        assert_eq!(
            by_order.rows[0].kind,
            RowKind::GroupHeader { key: "PO-2".into(), child_count: 2 }
        );
    }
}
