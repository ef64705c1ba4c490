use chrono::{TimeZone, Utc};
use synth_core::{Record, ReferenceData};
use synth_generator::{GeneratorOptions, RecordGenerator};

/// Fixed-time batch for export tests.
pub fn sample_batch(seed: u64, count: usize) -> Vec<Record> {
    let options = GeneratorOptions::new(seed)
        .with_reference_year(2024)
        .with_generated_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    RecordGenerator::new(ReferenceData::swiss().unwrap(), options)
        .unwrap()
        .generate_batch(count)
        .unwrap()
}
