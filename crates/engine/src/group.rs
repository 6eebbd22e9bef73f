//! Grouped sheet rendering: contiguous runs of equal keys become
//! collapsible sections, each under a labeled header row.
//!
//! Detection runs over the untouched table and finishes before any output
//! row exists. Construction is then a single forward pass that interleaves
//! header rows with data rows, so every coordinate is derived from the
//! original run bounds plus the number of headers already emitted:
//!
//! ```text
//! header_row  = start + offset
//! first_child = header_row + 1
//! last_child  = end + offset + 1
//! ```

use crate::cell::CellValue;
use crate::error::ReportError;
use crate::sheet::{OutlineSpan, SheetRow};
use crate::table::Table;

/// Outline depth of every group; nesting is not supported.
pub const GROUP_OUTLINE_LEVEL: u8 = 1;

/// A maximal run of adjacent rows sharing one key, in source row coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: CellValue,
    pub start: usize,
    pub end: usize,
}

impl Group {
    pub fn child_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Grouped body rows and their outline spans.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBody {
    pub groups: Vec<Group>,
    pub rows: Vec<SheetRow>,
    pub outlines: Vec<OutlineSpan>,
}

/// Split a key sequence into maximal runs of equal values.
///
/// Grouping is by contiguity only: a key that reappears after a different
/// key starts a new run. Sort first to get one run per distinct key.
pub fn detect_runs<'a, I>(keys: I) -> Vec<Group>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut groups = Vec::new();
    let mut current: Option<Group> = None;

    for (i, key) in keys.into_iter().enumerate() {
        if let Some(group) = current.as_mut() {
            if group.key == *key {
                group.end = i;
                continue;
            }
        }
        if let Some(done) = current.take() {
            groups.push(done);
        }
        current = Some(Group { key: key.clone(), start: i, end: i });
    }

    groups.extend(current);
    groups
}

/// Runs of `column` in `table`, or `None` when the column is absent.
pub fn detect_groups(table: &Table, column: &str) -> Option<Vec<Group>> {
    let col = table.column_index(column)?;
    Some(detect_runs(table.rows().iter().map(|row| &row[col])))
}

pub fn group_label(column: &str, key: &CellValue, total_label: &str, child_count: usize) -> String {
    format!("{column}: {} ({total_label}: {child_count})", key.display())
}

/// Interleave one header row above each run of `column` and outline the run.
///
/// `table` must already be sorted by `column`. `highlights` is indexed by
/// source row; header rows are never highlighted.
pub fn render_grouped(
    table: &Table,
    column: &str,
    highlights: &[bool],
    total_label: &str,
) -> Result<GroupedBody, ReportError> {
    let groups = detect_groups(table, column)
        .ok_or_else(|| ReportError::MissingGroupColumn { column: column.to_string() })?;

    let width = table.columns().len();
    let mut rows = Vec::with_capacity(table.len() + groups.len());
    let mut outlines = Vec::with_capacity(groups.len());

    for (offset, group) in groups.iter().enumerate() {
        let header_row = group.start + offset;
        debug_assert_eq!(rows.len(), header_row);

        let label = group_label(column, &group.key, total_label, group.child_count());
        rows.push(SheetRow::group_header(label, width, group.key.clone(), group.child_count()));

        for source in group.start..=group.end {
            let highlighted = highlights.get(source).copied().unwrap_or(false);
            rows.push(SheetRow::data(source, table.rows()[source].clone(), highlighted));
        }

        outlines.push(OutlineSpan {
            header_row,
            first_child: header_row + 1,
            last_child: group.end + offset + 1,
            level: GROUP_OUTLINE_LEVEL,
        });
    }

    log::debug!("grouped {} rows on '{column}' into {} sections", table.len(), groups.len());
    Ok(GroupedBody { groups, rows, outlines })
}
