//! CSV export of flat record rows.

use crate::error::ExportError;
use crate::exporter::{ExportMetrics, DEFAULT_BUFFER_SIZE};
use csv::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use synth_core::Record;
use tracing::{debug, info};

/// Writes records as CSV, one [`synth_core::FlatRow`] per line.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            include_header: true,
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Write `records` to a new CSV file at `output_path`.
    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[Record],
        output_path: P,
    ) -> Result<ExportMetrics, ExportError> {
        let first = records.first().ok_or(ExportError::NoRecords)?;
        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();

        let output_path = output_path.as_ref();
        info!(
            "Writing CSV file '{}' with {} records",
            output_path.display(),
            records.len()
        );

        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = Writer::from_writer(buf_writer);

        if self.include_header {
            writer.write_record(first.to_flat_row().column_names())?;
        }

        for record in records {
            writer.write_record(record.to_flat_row().to_strings())?;
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
            "CSV export complete: {} records, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }
}
