use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single scalar in a table or sheet view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Rendered text, as it appears in the written workbook.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    /// Numeric value for arithmetic. Empty cells and unparseable text are zero.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().replace(',', "").parse().unwrap_or(0.0),
            CellValue::Empty => 0.0,
        }
    }

    /// True only for real numbers strictly greater than zero; numeric-looking text does not count.
    pub fn is_positive_number(&self) -> bool {
        matches!(self, CellValue::Number(n) if *n > 0.0)
    }

    /// Ascending sort order: numbers by value, then text lexically, then empty cells.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(_), _) => Ordering::Less,
            (_, CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Text(_), CellValue::Empty) => Ordering::Less,
            (CellValue::Empty, CellValue::Text(_)) => Ordering::Greater,
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Presentation attached to a row or cell. Applied once when the workbook is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    /// Solid background fill as 0xRRGGBB
    pub fill: Option<u32>,
}

impl CellStyle {
    pub fn with_font(font_name: &str) -> Self {
        Self {
            font_name: Some(font_name.to_string()),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn filled(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    pub fn sized(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}
