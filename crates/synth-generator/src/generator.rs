//! Record assembly and batch generation.

use crate::career::CareerPathBuilder;
use crate::demographic::DemographicProfileGenerator;
use crate::education::EducationPathBuilder;
use crate::error::GeneratorError;
use crate::identity::{draw_uuid, IdRegistry};
use crate::skills::SkillProfileAssembler;
use chrono::{DateTime, Datelike, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use synth_core::{ReferenceData, Record};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Options fixed for the lifetime of a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Base seed; record `i` is drawn from a sub-stream derived from it.
    pub seed: u64,
    /// Year ages, birth years and career spans are measured against.
    pub reference_year: i32,
    /// Pinned generation timestamp. When unset, the generator takes the wall
    /// clock once at construction and stamps every record with it.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl GeneratorOptions {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            reference_year: Utc::now().year(),
            generated_at: None,
        }
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn with_generated_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.generated_at = Some(timestamp);
        self
    }
}

/// Generator that produces deterministic career-profile records.
///
/// Record `i` depends only on the base seed and `i`, so batches can be
/// generated in chunks, resumed from an index, or generated in parallel and
/// still match a single sequential run.
pub struct RecordGenerator {
    data: ReferenceData,
    options: GeneratorOptions,
    /// Index of the next record
    index: u64,
    ids: IdRegistry,
    generated_at: DateTime<Utc>,
}

impl RecordGenerator {
    /// Create a generator after validating the reference data.
    ///
    /// An unset `generated_at` is fixed to the current time here, so every
    /// record of this generator carries the same timestamp.
    pub fn new(data: ReferenceData, options: GeneratorOptions) -> Result<Self, GeneratorError> {
        data.validate()?;
        let generated_at = options.generated_at.unwrap_or_else(Utc::now);
        Ok(Self {
            data,
            options,
            index: 0,
            ids: IdRegistry::new(),
            generated_at,
        })
    }

    /// Set the index of the next record.
    ///
    /// This is useful for resuming a batch. Identifiers issued before the
    /// resume point are not known to the new generator.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Compute the sub-stream seed for a specific index.
    fn compute_rng_seed_for_index(&self, index: u64) -> u64 {
        self.options
            .seed
            .wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
    }

    fn rng_for_index(&self, index: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.compute_rng_seed_for_index(index))
    }

    /// Get the index of the next record.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Timestamp stamped on every record.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Build record `index` from its own sub-stream.
    ///
    /// The identifier is not yet checked against previously issued ones.
    pub fn record_at(&self, index: u64) -> Result<Record, GeneratorError> {
        let mut rng = self.rng_for_index(index);
        let data = &self.data;

        let profile = DemographicProfileGenerator::new(data, self.options.reference_year)
            .generate(&mut rng)?;
        let education = EducationPathBuilder::new(data).build(&mut rng, &profile)?;
        let career = CareerPathBuilder::new(data).build(&mut rng, &profile, &education)?;
        let assembler = SkillProfileAssembler::new(data);
        let skills = assembler.build(&mut rng, &profile)?;
        let leisure_activities = assembler.leisure_activities(&mut rng);
        let id = draw_uuid(&mut rng);

        debug!(
            index,
            education_stages = education.len(),
            career_stages = career.len(),
            "Generated record"
        );

        Ok(Record {
            id,
            profile,
            education,
            career,
            skills,
            leisure_activities,
            generated_at: self.generated_at(),
        })
    }

    /// Claim the record's identifier, resampling it on collision.
    ///
    /// Resamples come from dedicated ChaCha streams of the record's seed, so
    /// the outcome does not depend on how the batch was split.
    fn claim_id(&mut self, index: u64, record: &mut Record) {
        let mut attempt = 0u64;
        while !self.ids.claim(record.id) {
            attempt += 1;
            warn!(index, id = %record.id, attempt, "Identifier collision, resampling");
            let mut rng = self.rng_for_index(index);
            rng.set_stream(attempt);
            record.id = draw_uuid(&mut rng);
        }
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> Result<Record, GeneratorError> {
        let index = self.index;
        let mut record = self.record_at(index)?;
        self.claim_id(index, &mut record);
        self.index += 1;
        Ok(record)
    }

    /// Generate `count` records sequentially.
    pub fn generate_batch(&mut self, count: usize) -> Result<Vec<Record>, GeneratorError> {
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.next_record()?);
        }
        Ok(records)
    }

    /// Generate `count` records in chunks of `chunk_size`.
    ///
    /// `on_progress(done, total)` is called after every chunk. The result is
    /// identical to [`RecordGenerator::generate_batch`] for the same count.
    pub fn generate_batch_chunked<F>(
        &mut self,
        count: usize,
        chunk_size: usize,
        mut on_progress: F,
    ) -> Result<Vec<Record>, GeneratorError>
    where
        F: FnMut(usize, usize),
    {
        if chunk_size == 0 {
            return Err(GeneratorError::InvalidChunkSize);
        }

        info!(count, chunk_size, start_index = self.index, "Generating batch");
        let mut records = Vec::with_capacity(count);
        while records.len() < count {
            let size = chunk_size.min(count - records.len());
            records.extend(self.generate_batch(size)?);
            info!(done = records.len(), total = count, "Chunk complete");
            on_progress(records.len(), count);
        }
        Ok(records)
    }

    /// Generate `count` records on the rayon thread pool.
    ///
    /// Produces the same records as [`RecordGenerator::generate_batch`].
    pub fn generate_batch_parallel(&mut self, count: usize) -> Result<Vec<Record>, GeneratorError> {
        let start = self.index;
        let end = start + count as u64;
        info!(count, start_index = start, "Generating batch in parallel");

        let mut records = (0..count)
            .into_par_iter()
            .map(|offset| self.record_at(start + offset as u64))
            .collect::<Result<Vec<_>, _>>()?;

        for (offset, record) in records.iter_mut().enumerate() {
            self.claim_id(start + offset as u64, record);
        }
        self.index = end;
        Ok(records)
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: usize) -> RecordIterator<'_> {
        RecordIterator {
            generator: self,
            remaining: count,
        }
    }

    /// Whether `id` has been issued by this generator.
    pub fn has_issued(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }
}

/// Iterator that lazily generates records.
pub struct RecordIterator<'a> {
    generator: &'a mut RecordGenerator,
    remaining: usize,
}

impl Iterator for RecordIterator<'_> {
    type Item = Result<Record, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RecordIterator<'_> {}
