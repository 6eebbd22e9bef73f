// File I/O operations

pub mod csv;
pub mod xlsx;

pub use csv::ImportError;
pub use xlsx::ExportResult;
