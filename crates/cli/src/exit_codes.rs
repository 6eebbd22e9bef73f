//! CLI Exit Code Registry
//!
//! Single source of truth for `shipalloc` exit codes. Scripts that run the
//! nightly upload branch on these, so treat them as a contract.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | Usage error (bad arguments)                     |
//! | 3    | I/O error (input, config or output file)        |
//! | 4    | Extract could not be decoded or parsed          |
//! | 5    | Extract lacks columns the derived values need   |
//! | 6    | Invalid configuration                           |

use shipalloc_engine::ReportError;
use shipalloc_io::ImportError;

/// Success - every artifact was written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments or flag values (clap errors, empty `--prefix`).
pub const EXIT_USAGE: u8 = 2;

/// Input, config or output file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Extract bytes are not valid in the configured encoding, or the CSV is malformed.
pub const EXIT_INPUT: u8 = 4;

/// Unit price, shipped or ordered quantity column is missing.
pub const EXIT_MISSING_COLUMNS: u8 = 5;

/// Config file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 6;

/// Map an import failure to its exit code.
pub fn import_exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::Io(_) => EXIT_IO,
        // The label comes from the config file
        ImportError::UnknownEncoding(_) => EXIT_CONFIG,
        ImportError::Encoding { .. } | ImportError::Csv(_) | ImportError::Empty => EXIT_INPUT,
    }
}

/// Map a report build failure to its exit code.
pub fn report_exit_code(err: &ReportError) -> u8 {
    match err {
        ReportError::ConfigParse(_) | ReportError::ConfigValidation(_) => EXIT_CONFIG,
        ReportError::MissingColumns { .. } => EXIT_MISSING_COLUMNS,
        ReportError::MissingGroupColumn { .. } => EXIT_ERROR,
    }
}
