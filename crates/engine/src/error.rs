use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad color, duplicate sheet name, etc.).
    ConfigValidation(String),
    /// Columns required for derived-column computation are absent.
    MissingColumns { columns: Vec<String> },
    /// A grouping or partition key column is absent. Soft: the affected
    /// view degrades instead of failing the build.
    MissingGroupColumn { column: String },
}

impl ReportError {
    /// Soft errors degrade a single view; the build continues.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::MissingGroupColumn { .. })
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumns { columns } => {
                write!(f, "missing required columns: {}", columns.join(", "))
            }
            Self::MissingGroupColumn { column } => {
                write!(f, "column '{column}' not found")
            }
        }
    }
}

impl std::error::Error for ReportError {}
