//! Export metrics and format dispatch.

use crate::csv_writer::CsvExporter;
use crate::error::ExportError;
use crate::json_writer::{JsonExporter, JsonlExporter};
use crate::xlsx_writer::XlsxExporter;
use clap::ValueEnum;
use std::path::Path;
use std::time::Duration;
use synth_core::Record;

/// Default buffer size for file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from an export operation.
#[derive(Debug, Clone, Default)]
pub struct ExportMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

impl ExportMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// File formats a batch can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One flat row per record
    Csv,
    /// Pretty-printed envelope with batch metadata
    Json,
    /// One JSON record per line
    Jsonl,
    /// Excel workbook, one flat row per record
    #[value(alias = "excel")]
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Format matching the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Write `records` to `path` in `format`.
///
/// `seed` is recorded in the JSON envelope metadata and ignored otherwise.
pub fn export_records<P: AsRef<Path>>(
    format: ExportFormat,
    records: &[Record],
    path: P,
    seed: Option<u64>,
) -> Result<ExportMetrics, ExportError> {
    match format {
        ExportFormat::Csv => CsvExporter::new().export(records, path),
        ExportFormat::Json => JsonExporter::new().with_seed(seed).export(records, path),
        ExportFormat::Jsonl => JsonlExporter::new().export(records, path),
        ExportFormat::Xlsx => XlsxExporter::new().export(records, path),
    }
}
