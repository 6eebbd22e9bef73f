//! Visible vs. hidden reference columns.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Visible,
    Hidden,
}

/// Classify each column label by exact match against the hidden set.
pub fn classify_columns<S: AsRef<str>>(columns: &[String], hidden: &[S]) -> Vec<ColumnClass> {
    columns
        .iter()
        .map(|label| {
            if hidden.iter().any(|h| h.as_ref() == label.as_str()) {
                ColumnClass::Hidden
            } else {
                ColumnClass::Visible
            }
        })
        .collect()
}
