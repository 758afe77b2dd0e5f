//! Summary export
//!
//! Writes derived analytics to a delimited file for spreadsheet use.

pub mod summary;

pub use summary::{export_summary_file, write_summary, ExportError};
