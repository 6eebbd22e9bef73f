use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Column-name, style and naming contracts for one report build.
///
/// Every key has a default, so an empty TOML document gives the stock
/// shipment-allocation report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub columns: ColumnConfig,
    pub style: StyleConfig,
    pub sheets: SheetNames,
    pub split: SplitConfig,
    pub output: OutputConfig,
    pub input: InputConfig,
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Grouping key of the by-order sheet
    pub order_no: String,
    /// Grouping key of the by-product sheet
    pub product_name: String,
    /// Key of the two-way artifact split
    pub product_code: String,
    pub unit_price: String,
    pub shipped_qty: String,
    pub ordered_qty: String,
    pub shipped_amount: String,
    /// Also the highlight trigger column
    pub correction_qty: String,
    pub ordered_amount: String,
    pub shortage_amount: String,
    /// Reference columns hidden in every sheet
    pub hidden: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            order_no: "相手先注文No".into(),
            product_name: "商品名".into(),
            product_code: "商品CD".into(),
            unit_price: "単価".into(),
            shipped_qty: "出荷数".into(),
            ordered_qty: "受注数".into(),
            shipped_amount: "出荷金額".into(),
            correction_qty: "出荷数要訂正".into(),
            ordered_amount: "受注金額".into(),
            shortage_amount: "欠品金額".into(),
            hidden: [
                "受注No", "受注行No", "出荷優先度", "倉庫CD", "倉庫名", "得意先CD", "得意先名",
                "ロケ", "ﾏｽﾀ単価", "金額", "現在庫数", "出荷指示数", "未出荷数", "単価相違",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Column-header and group-label fill, hex RRGGBB
    pub accent_color: String,
    /// Fill of rows needing correction, hex RRGGBB
    pub highlight_color: String,
    pub font_name: String,
    pub header_font_size: f64,
    pub width_multiplier: f64,
    pub width_margin: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            accent_color: "FFD580".into(),
            highlight_color: "FFFF00".into(),
            font_name: "Yu Gothic".into(),
            header_font_size: 12.0,
            width_multiplier: 1.5,
            width_margin: 2.0,
        }
    }
}

impl StyleConfig {
    pub fn accent_rgb(&self) -> u32 {
        parse_hex_color(&self.accent_color).unwrap_or(0xFFD580)
    }

    pub fn highlight_rgb(&self) -> u32 {
        parse_hex_color(&self.highlight_color).unwrap_or(0xFFFF00)
    }
}

/// Parse `RRGGBB` (optionally `#`-prefixed) into 0xRRGGBB.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

// ---------------------------------------------------------------------------
// Sheets, split, output, input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub raw: String,
    pub by_order: String,
    pub by_product: String,
    /// Word used in group header labels, e.g. `商品名: X (合計: 3)`
    pub total_label: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            raw: "Sheet1".into(),
            by_order: "相手先注文".into(),
            by_product: "商品名".into(),
            total_label: "合計".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub prefix: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { prefix: "15".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub full: String,
    pub matching: String,
    pub non_matching: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            full: "出荷在庫引当.xlsx".into(),
            matching: "出荷在庫引当_4251.xlsx".into(),
            non_matching: "出荷在庫引当_9052.xlsx".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// WHATWG encoding label of the extract
    pub encoding: String,
    /// Lines discarded before the header line
    pub preamble_lines: usize,
    /// Export columns removed from the end when the extract is wider than two columns
    pub drop_trailing_columns: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            encoding: "windows-31j".into(),
            preamble_lines: 1,
            drop_trailing_columns: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

const MAX_SHEET_NAME_CHARS: usize = 31;
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReportError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReportError> {
        toml::to_string_pretty(self).map_err(|e| ReportError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let invalid = |msg: String| Err(ReportError::ConfigValidation(msg));

        for (key, value) in [
            ("style.accent_color", &self.style.accent_color),
            ("style.highlight_color", &self.style.highlight_color),
        ] {
            if parse_hex_color(value).is_none() {
                return invalid(format!("{key} must be a 6-digit hex color, got '{value}'"));
            }
        }

        if !(self.style.width_multiplier > 0.0) {
            return invalid(format!(
                "style.width_multiplier must be positive, got {}",
                self.style.width_multiplier
            ));
        }
        if !(self.style.width_margin >= 0.0) {
            return invalid(format!(
                "style.width_margin must not be negative, got {}",
                self.style.width_margin
            ));
        }
        if !(self.style.header_font_size > 0.0) {
            return invalid(format!(
                "style.header_font_size must be positive, got {}",
                self.style.header_font_size
            ));
        }

        let sheet_names = [&self.sheets.raw, &self.sheets.by_order, &self.sheets.by_product];
        for name in sheet_names {
            if name.trim().is_empty() {
                return invalid("sheet names must not be empty".into());
            }
            if name.chars().count() > MAX_SHEET_NAME_CHARS {
                return invalid(format!(
                    "sheet name '{name}' exceeds {MAX_SHEET_NAME_CHARS} characters"
                ));
            }
            if name.contains(INVALID_SHEET_CHARS) {
                return invalid(format!("sheet name '{name}' contains a forbidden character"));
            }
        }
        if sheet_names.iter().collect::<HashSet<_>>().len() != sheet_names.len() {
            return invalid("sheet names must be distinct".into());
        }

        if self.split.prefix.is_empty() {
            return invalid("split.prefix must not be empty".into());
        }

        let outputs = [&self.output.full, &self.output.matching, &self.output.non_matching];
        if outputs.iter().any(|name| name.trim().is_empty()) {
            return invalid("output file names must not be empty".into());
        }
        if outputs.iter().collect::<HashSet<_>>().len() != outputs.len() {
            return invalid("output file names must be distinct".into());
        }

        if self.input.encoding.trim().is_empty() {
            return invalid("input.encoding must not be empty".into());
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.columns.correction_qty, "出荷数要訂正");
        assert_eq!(config.columns.hidden.len(), 14);
        assert_eq!(config.style.accent_rgb(), 0xFFD580);
        assert_eq!(config.split.prefix, "15");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ReportConfig::from_toml(
            r##"
[columns]
order_no = "PO"
hidden = ["internal_id"]

[style]
accent_color = "#336699"
"##,
        )
        .unwrap();
        assert_eq!(config.columns.order_no, "PO");
        assert_eq!(config.columns.product_name, "商品名");
        assert_eq!(config.columns.hidden, vec!["internal_id".to_string()]);
        assert_eq!(config.style.accent_rgb(), 0x336699);
        assert_eq!(config.style.font_name, "Yu Gothic");
    }

    #[test]
    fn rejects_bad_color() {
        let err = ReportConfig::from_toml("[style]\nhighlight_color = \"yellow\"\n").unwrap_err();
        assert!(matches!(err, ReportError::ConfigValidation(_)));
        assert!(err.to_string().contains("highlight_color"));
    }

    #[test]
    fn rejects_duplicate_sheet_names() {
        let err = ReportConfig::from_toml("[sheets]\nby_order = \"Sheet1\"\n").unwrap_err();
        assert_eq!(
            err,
            ReportError::ConfigValidation("sheet names must be distinct".into())
        );
    }

    #[test]
    fn rejects_forbidden_sheet_characters() {
        let err = ReportConfig::from_toml("[sheets]\nraw = \"a/b\"\n").unwrap_err();
        assert!(err.to_string().contains("forbidden"));
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let err = ReportConfig::from_toml("[style]\nwidth_multiplier = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("width_multiplier"));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ReportConfig::from_toml("[style\n").unwrap_err();
        assert!(matches!(err, ReportError::ConfigParse(_)));
    }

    #[test]
    fn toml_round_trip_preserves_config() {
        let mut config = ReportConfig::default();
        config.split.prefix = "20".into();
        let text = config.to_toml().unwrap();
        assert_eq!(ReportConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(parse_hex_color("FFFF00"), Some(0xFFFF00));
        assert_eq!(parse_hex_color("#ffd580"), Some(0xFFD580));
        assert_eq!(parse_hex_color("FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }
}
