//! JSON and JSONL export.
//!
//! JSON files carry a metadata envelope:
//!
//! ```text
//! {
//!   "metadata": { "generated_at", "total_records", "generator_version", "seed" },
//!   "records": [ ... ]
//! }
//! ```
//!
//! JSONL files hold one bare record per line.

use crate::error::ExportError;
use crate::exporter::{ExportMetrics, DEFAULT_BUFFER_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use synth_core::Record;
use tracing::{debug, info};

/// Version written into the envelope metadata.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Batch-level metadata of a JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetadata {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub generator_version: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A JSON export as read back from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchFile {
    pub metadata: BatchMetadata,
    pub records: Vec<Record>,
}

#[derive(Serialize)]
struct BatchFileRef<'a> {
    metadata: &'a BatchMetadata,
    records: &'a [Record],
}

/// Writes a batch as a single JSON document with metadata.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    pretty: bool,
    seed: Option<u64>,
    generated_at: Option<DateTime<Utc>>,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self {
            pretty: true,
            seed: None,
            generated_at: None,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Seed recorded in the metadata.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the metadata timestamp instead of using the export time.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn metadata(&self, total_records: usize) -> BatchMetadata {
        BatchMetadata {
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            total_records,
            generator_version: GENERATOR_VERSION.to_string(),
            seed: self.seed,
        }
    }

    /// Write `records` to a new JSON file at `output_path`.
    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[Record],
        output_path: P,
    ) -> Result<ExportMetrics, ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }
        let start_time = Instant::now();
        let output_path = output_path.as_ref();
        info!(
            "Writing JSON file '{}' with {} records",
            output_path.display(),
            records.len()
        );

        let metadata = self.metadata(records.len());
        let document = BatchFileRef {
            metadata: &metadata,
            records,
        };

        let file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        let metrics = ExportMetrics {
            records_written: records.len() as u64,
            total_duration: start_time.elapsed(),
            file_size_bytes: std::fs::metadata(output_path)?.len(),
        };
        info!(
            "JSON export complete: {} records, {} bytes in {:?}",
            metrics.records_written, metrics.file_size_bytes, metrics.total_duration
        );
        Ok(metrics)
    }
}

/// Writes one JSON record per line.
#[derive(Debug, Clone, Default)]
pub struct JsonlExporter;

impl JsonlExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write `records` to a new JSONL file at `output_path`.
    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[Record],
        output_path: P,
    ) -> Result<ExportMetrics, ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }
        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();
        let output_path = output_path.as_ref();
        info!(
            "Writing JSONL file '{}' with {} records",
            output_path.display(),
            records.len()
        );

        let file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
            metrics.records_written += 1;

            if metrics.records_written % 10000 == 0 {
                debug!("Written {} records", metrics.records_written);
            }
        }
        writer.flush()?;
        drop(writer);

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();
        info!(
            "JSONL export complete: {} records in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.total_duration,
            metrics.records_per_second()
        );
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_batch;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_export_json_envelope() {
        let records = sample_batch(42, 6);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("cvs.json");
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();

        let metrics = JsonExporter::new()
            .with_seed(Some(42))
            .with_generated_at(at)
            .export(&records, &output_path)
            .unwrap();
        assert_eq!(metrics.records_written, 6);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["metadata"]["total_records"], 6);
        assert_eq!(value["metadata"]["seed"], 42);
        assert_eq!(value["metadata"]["generator_version"], GENERATOR_VERSION);
        assert_eq!(value["records"].as_array().unwrap().len(), 6);
        assert_eq!(
            value["records"][0]["id"],
            serde_json::Value::String(records[0].id.to_string())
        );

        let batch: BatchFile = serde_json::from_str(&content).unwrap();
        assert_eq!(batch.metadata.generated_at, at);
        assert_eq!(batch.records, records);
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let records = sample_batch(1, 3);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("cvs.json");

        JsonExporter::new()
            .with_pretty(false)
            .export(&records, &output_path)
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_export_jsonl() {
        let records = sample_batch(9, 4);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("cvs.jsonl");

        let metrics = JsonlExporter::new().export(&records, &output_path).unwrap();
        assert_eq!(metrics.records_written, 4);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        let second: Record = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second, records[1]);
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            JsonExporter::new().export(&[], temp_dir.path().join("a.json")),
            Err(ExportError::NoRecords)
        ));
        assert!(matches!(
            JsonlExporter::new().export(&[], temp_dir.path().join("a.jsonl")),
            Err(ExportError::NoRecords)
        ));
    }
}
