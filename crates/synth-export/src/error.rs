//! Error types for record export.

use thiserror::Error;

/// Errors that can occur while writing or loading record files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workbook error.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Formatting error while rendering a record.
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// File extension or format name that has no exporter.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Batch does not fit in one worksheet.
    #[error("{rows} records exceed the worksheet limit of {max} rows")]
    TooManyRows { rows: usize, max: usize },

    /// Nothing to export.
    #[error("No records to export")]
    NoRecords,
}
