// shipalloc CLI - builds the grouped shipment allocation workbooks from an
// order-management extract

mod exit_codes;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shipalloc_engine::ReportError;
use tracing_subscriber::EnvFilter;

use exit_codes::{report_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "shipalloc")]
#[command(about = "Build grouped shipment allocation report workbooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an extract and write the full and prefix-split workbooks
    #[command(after_help = "\
Examples:
  shipalloc build extract.csv
  shipalloc build extract.csv --out-dir upload/
  shipalloc build extract.csv --config report.toml --json
  shipalloc build extract.csv --prefix 16")]
    Build {
        /// Extract CSV (legacy encoding, preamble line before the header)
        input: PathBuf,

        /// Directory the workbooks are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// TOML report config (defaults to the stock report)
        #[arg(long, env = "SHIPALLOC_CONFIG")]
        config: Option<PathBuf>,

        /// Override the product-code prefix used for the split
        #[arg(long)]
        prefix: Option<String>,

        /// Print a JSON summary to stdout
        #[arg(long)]
        json: bool,

        /// Only log warnings and errors
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print the effective report config as TOML
    #[command(after_help = "\
Examples:
  shipalloc config > report.toml
  shipalloc config --config report.toml")]
    Config {
        /// TOML report config to load and validate
        #[arg(long, env = "SHIPALLOC_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { input, out_dir, config, prefix, json, quiet } => {
            init_logging(quiet || json);
            report::cmd_build(input, out_dir, config, prefix, json, quiet)
        }
        Commands::Config { config } => {
            init_logging(true);
            report::cmd_config(config)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Create error from a report error with its registry exit code.
    pub fn report(err: ReportError) -> Self {
        let hint = match &err {
            ReportError::MissingColumns { .. } => {
                Some("check the extract header or the [columns] section of the config".to_string())
            }
            ReportError::ConfigParse(_) | ReportError::ConfigValidation(_) => {
                Some("run `shipalloc config` to see the expected keys".to_string())
            }
            ReportError::MissingGroupColumn { .. } => None,
        };
        Self { code: report_exit_code(&err), message: err.to_string(), hint }
    }
}
