//! Record export for career-synth.
//!
//! This crate writes generated batches to CSV and XLSX (flat rows), JSON
//! (with a metadata envelope) and JSONL, loads JSON/JSONL batches back for
//! validation, and renders single records as text, markdown or HTML CVs.
//!
//! # Example
//!
//! ```ignore
//! use synth_export::{export_records, ExportFormat};
//!
//! let metrics = export_records(ExportFormat::Csv, &records, "cvs.csv", Some(42))?;
//! println!("{} records written", metrics.records_written);
//! ```

pub mod args;
mod csv_writer;
mod error;
mod exporter;
mod formatter;
mod json_writer;
mod loader;
mod xlsx_writer;

#[cfg(test)]
mod testing;

pub use args::{BatchArgs, CommonGenerateArgs, SingleArgs, CONFIRM_THRESHOLD};
pub use csv_writer::CsvExporter;
pub use error::ExportError;
pub use exporter::{export_records, ExportFormat, ExportMetrics, DEFAULT_BUFFER_SIZE};
pub use formatter::{render_html, render_markdown, render_record, render_text, DisplayFormat};
pub use json_writer::{BatchFile, BatchMetadata, JsonExporter, JsonlExporter, GENERATOR_VERSION};
pub use loader::load_records;
pub use xlsx_writer::{XlsxExporter, XLSX_MAX_ROWS};
