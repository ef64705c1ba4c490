//! Loading exported batches back into records.

use crate::error::ExportError;
use crate::exporter::ExportFormat;
use crate::json_writer::BatchFile;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use synth_core::Record;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonBatch {
    Envelope(BatchFile),
    Bare(Vec<Record>),
}

/// Load records from a JSON or JSONL export.
///
/// JSON files may be a metadata envelope or a bare array of records. CSV and
/// XLSX are rejected since flat rows cannot be turned back into records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, ExportError> {
    let path = path.as_ref();
    let records = match ExportFormat::from_path(path)? {
        ExportFormat::Json => {
            let reader = BufReader::new(File::open(path)?);
            let batch: JsonBatch = serde_json::from_reader(reader)?;
            match batch {
                JsonBatch::Envelope(batch) => batch.records,
                JsonBatch::Bare(records) => records,
            }
        }
        ExportFormat::Jsonl => {
            let reader = BufReader::new(File::open(path)?);
            let mut records = Vec::new();
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(serde_json::from_str(&line)?);
            }
            records
        }
        ExportFormat::Csv | ExportFormat::Xlsx => {
            return Err(ExportError::UnsupportedFormat(format!(
                "{} (flat exports cannot be loaded)",
                path.display()
            )))
        }
    };

    info!("Loaded {} records from '{}'", records.len(), path.display());
    Ok(records)
}
