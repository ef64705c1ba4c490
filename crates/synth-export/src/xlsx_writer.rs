//! Excel workbook export of flat record rows.

use crate::error::ExportError;
use crate::exporter::ExportMetrics;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use std::time::Instant;
use synth_core::{FlatValue, Record};
use tracing::{debug, info};

/// Rows per worksheet, header included.
pub const XLSX_MAX_ROWS: usize = 1_048_576;

/// Writes records to a single-sheet workbook, one [`synth_core::FlatRow`] per row.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self {
            sheet_name: "Profiles".to_string(),
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Write `records` to a new workbook at `output_path`.
    ///
    /// Integer cells are stored as numbers, absent values as empty cells.
    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[Record],
        output_path: P,
    ) -> Result<ExportMetrics, ExportError> {
        let first = records.first().ok_or(ExportError::NoRecords)?;
        if records.len() >= XLSX_MAX_ROWS {
            return Err(ExportError::TooManyRows {
                rows: records.len(),
                max: XLSX_MAX_ROWS - 1,
            });
        }
        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();

        let output_path = output_path.as_ref();
        info!(
            "Writing XLSX file '{}' with {} records",
            output_path.display(),
            records.len()
        );

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new().set_bold();
        for (col, name) in (0u16..).zip(first.to_flat_row().column_names()) {
            worksheet.write_string_with_format(0, col, name, &header_format)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (row, record) in (1u32..).zip(records) {
            let flat = record.to_flat_row();
            worksheet.write_string(row, 0, flat.id.to_string())?;
            for (col, (_, value)) in (1u16..).zip(&flat.fields) {
                match value {
                    FlatValue::Int(i) => {
                        worksheet.write_number(row, col, *i as f64)?;
                    }
                    FlatValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    FlatValue::Null => {}
                }
            }
            metrics.records_written += 1;

            if metrics.records_written % 10000 == 0 {
                debug!("Written {} records", metrics.records_written);
            }
        }

        workbook.save(output_path)?;

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();

        info!(
            "XLSX export complete: {} records, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }
}
