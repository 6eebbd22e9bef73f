//! `shipalloc-engine`: grouped report workbook builder.
//!
//! Pure engine crate: receives a loaded table, returns styled sheet views.
//! No file or workbook-format dependencies.

pub mod cell;
pub mod classify;
pub mod config;
pub mod derive;
pub mod error;
pub mod group;
pub mod highlight;
pub mod partition;
pub mod sheet;
pub mod style;
pub mod table;
pub mod workbook;

pub use cell::{CellStyle, CellValue};
pub use config::ReportConfig;
pub use error::ReportError;
pub use sheet::{OutlineSpan, RowKind, SheetColumn, SheetRow, SheetView};
pub use table::{Row, Table};
pub use workbook::{assemble_workbook, build_upload, Artifact, ArtifactKind, ReportWorkbook};
