use crate::cell::CellValue;

/// One record, values aligned with the owning table's column list.
pub type Row = Vec<CellValue>;

/// A flat table with one shared column schema.
///
/// Every row holds exactly one value per column; rows are padded with
/// `CellValue::Empty` or truncated when they enter the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self { columns, rows: Vec::with_capacity(rows.len()) };
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.column_index(column).and_then(|col| self.get(row, col))
    }

    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Replace the values of `name`, appending the column if it does not exist yet.
    /// `values` must hold one value per row.
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(col) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[col] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Remove the last `n` columns.
    pub fn drop_trailing_columns(&mut self, n: usize) {
        let keep = self.columns.len().saturating_sub(n);
        self.columns.truncate(keep);
        for row in &mut self.rows {
            row.truncate(keep);
        }
    }

    /// Same columns, rows selected by index in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rows_are_normalized_to_column_count() {
        let table = Table::new(
            cols(&["a", "b", "c"]),
            vec![
                vec![CellValue::Number(1.0)],
                vec![
                    CellValue::Number(1.0),
                    CellValue::Number(2.0),
                    CellValue::Number(3.0),
                    CellValue::Number(4.0),
                ],
            ],
        );
        assert!(table.rows().iter().all(|r| r.len() == 3));
        assert_eq!(table.get(0, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut table = Table::new(cols(&["a"]), vec![vec![1.0.into()], vec![2.0.into()]]);
        table.set_column("b", vec![10.0.into(), 20.0.into()]);
        assert_eq!(table.columns(), &["a", "b"]);
        table.set_column("a", vec![5.0.into(), 6.0.into()]);
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.value(1, "a"), Some(&CellValue::Number(6.0)));
        assert_eq!(table.value(1, "b"), Some(&CellValue::Number(20.0)));
    }

    #[test]
    fn test_drop_trailing_columns() {
        let mut table = Table::new(
            cols(&["a", "b", "c", "d"]),
            vec![vec!["1".into(), "2".into(), "3".into(), "4".into()]],
        );
        table.drop_trailing_columns(2);
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.rows()[0].len(), 2);
    }
}
