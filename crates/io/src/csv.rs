// Extract CSV import
//
// The extract is a legacy-encoded CSV whose first line is a preamble and
// whose second line holds the real header.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use shipalloc_engine::config::InputConfig;
use shipalloc_engine::{CellValue, Table};

/// Plain or thousands-grouped decimal: `12`, `-1,234.5`, `0.25`
static LOCALE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// File could not be read.
    Io(String),
    /// The configured encoding label is not known.
    UnknownEncoding(String),
    /// Input bytes are not valid in the configured encoding.
    Encoding { encoding: String },
    /// Malformed CSV record.
    Csv(String),
    /// No header line after the preamble.
    Empty,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::UnknownEncoding(label) => write!(f, "unknown encoding: {label}"),
            Self::Encoding { encoding } => {
                write!(f, "input is not valid {encoding} text")
            }
            Self::Csv(msg) => write!(f, "CSV parse error: {msg}"),
            Self::Empty => write!(f, "input has no header line"),
        }
    }
}

impl std::error::Error for ImportError {}

pub fn import(path: &Path, input: &InputConfig) -> Result<Table, ImportError> {
    let bytes =
        std::fs::read(path).map_err(|e| ImportError::Io(format!("{}: {e}", path.display())))?;
    import_from_bytes(&bytes, input)
}

pub fn import_from_bytes(bytes: &[u8], input: &InputConfig) -> Result<Table, ImportError> {
    let content = decode(bytes, &input.encoding)?;
    import_from_string(&content, input)
}

/// Decode `bytes` strictly: any malformed sequence is an error, never a
/// replacement character.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, ImportError> {
    let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ImportError::UnknownEncoding(label.to_string()))?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| ImportError::Encoding { encoding: encoding.name().to_string() })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    })
}

pub fn import_from_string(content: &str, input: &InputConfig) -> Result<Table, ImportError> {
    let body = skip_lines(content, input.preamble_lines);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| ImportError::Csv(e.to_string()))?,
        None => return Err(ImportError::Empty),
    };
    let columns = column_names(header.iter());

    let mut raw: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record = result.map_err(|e| ImportError::Csv(e.to_string()))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let mut fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        fields.resize(columns.len(), String::new());
        raw.push(fields);
    }

    let numeric: Vec<bool> = (0..columns.len())
        .map(|col| {
            raw.iter()
                .all(|row| row[col].is_empty() || parse_locale_number(&row[col]).is_some())
        })
        .collect();

    let rows = raw
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .zip(&numeric)
                .map(|(field, &is_numeric)| typed_cell(field, is_numeric))
                .collect()
        })
        .collect();

    let mut table = Table::new(columns, rows);
    if table.columns().len() > 2 {
        table.drop_trailing_columns(input.drop_trailing_columns);
    }

    log::debug!(
        "imported {} rows x {} columns ({} numeric)",
        table.len(),
        table.columns().len(),
        numeric.iter().filter(|n| **n).count()
    );
    Ok(table)
}

/// Parse a number that may carry thousands separators.
pub fn parse_locale_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !LOCALE_NUMBER.is_match(trimmed) {
        return None;
    }
    trimmed.replace(',', "").parse().ok()
}

fn typed_cell(field: String, is_numeric: bool) -> CellValue {
    if is_numeric {
        // Empty numeric cells mean zero
        CellValue::Number(parse_locale_number(&field).unwrap_or(0.0))
    } else if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field)
    }
}

fn skip_lines(content: &str, n: usize) -> &str {
    let mut rest = content;
    for _ in 0..n {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}

/// Trimmed header labels. Blank labels become `Unnamed: N`; repeats get
/// `.1`, `.2`, ... suffixes.
fn column_names<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();
    for (idx, label) in labels.enumerate() {
        let base = match label.trim() {
            "" => format!("Unnamed: {idx}"),
            trimmed => trimmed.to_string(),
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 { base.clone() } else { format!("{base}.{count}") };
        *count += 1;
        names.push(name);
    }
    names
}
