//! `shipalloc build` and `shipalloc config`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use shipalloc_engine::{build_upload, ArtifactKind, ReportConfig};
use shipalloc_io::{csv, xlsx};

use crate::exit_codes::import_exit_code;
use crate::CliError;

#[derive(Debug, Serialize)]
struct BuildSummary {
    input: String,
    rows: usize,
    artifacts: Vec<ArtifactSummary>,
}

#[derive(Debug, Serialize)]
struct ArtifactSummary {
    kind: &'static str,
    path: String,
    rows: usize,
    sheets: usize,
    groups: usize,
    hidden_columns: usize,
    warnings: Vec<String>,
}

fn kind_name(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Full => "full",
        ArtifactKind::Matching => "matching",
        ArtifactKind::NonMatching => "non_matching",
    }
}

/// Read the config file, or fall back to the stock report settings.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    ReportConfig::from_toml(&text).map_err(CliError::report)
}

pub fn cmd_build(
    input: PathBuf,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
    prefix: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            return Err(CliError::args("--prefix must not be empty")
                .with_hint("omit --prefix to use split.prefix from the config"));
        }
        config.split.prefix = prefix;
    }

    let table = csv::import(&input, &config.input).map_err(|e| {
        let hint = match &e {
            shipalloc_io::ImportError::Encoding { .. } => Some(format!(
                "set input.encoding in the config file (current: {})",
                config.input.encoding
            )),
            _ => None,
        };
        CliError { code: import_exit_code(&e), message: e.to_string(), hint }
    })?;
    log::info!("read {} rows from {}", table.len(), input.display());

    let artifacts = build_upload(&table, &config).map_err(CliError::report)?;

    std::fs::create_dir_all(&out_dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", out_dir.display())))?;

    let mut summary = BuildSummary {
        input: input.display().to_string(),
        rows: table.len(),
        artifacts: Vec::new(),
    };
    for artifact in &artifacts {
        let path = out_dir.join(&artifact.file_name);
        let result = xlsx::export(&artifact.workbook, &path).map_err(CliError::io)?;

        summary.artifacts.push(ArtifactSummary {
            kind: kind_name(artifact.kind),
            path: path.display().to_string(),
            rows: artifact.source_rows,
            sheets: result.sheets_exported,
            groups: result.groups_exported,
            hidden_columns: result.hidden_columns_exported,
            warnings: artifact.workbook.warnings.iter().map(|w| w.to_string()).collect(),
        });
    }

    if json {
        let out = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else if !quiet {
        for a in &summary.artifacts {
            eprintln!("{}: {} rows, {} groups", a.path, a.rows, a.groups);
        }
    }

    Ok(())
}

pub fn cmd_config(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let text = config.to_toml().map_err(CliError::report)?;
    print!("{text}");
    Ok(())
}
