//! Career path construction.
//!
//! Careers climb the sector's progression ladder one rung per stage, starting
//! the year after education ends. Employment is continuous: each stage starts
//! the year the previous one ended. A stage reaching the reference year is
//! ongoing and has no end year.

use crate::error::GeneratorError;
use crate::sampler::{bernoulli, choose, uniform_int, weighted_index};
use rand::RngCore;
use synth_core::reference::{ReferenceData, SectorData};
use synth_core::{
    CareerStage, ConfigError, DemographicProfile, EducationStage, EmployerSize, EmploymentType,
    Workload,
};

/// Builds career paths from a profile and its education path.
pub struct CareerPathBuilder<'a> {
    data: &'a ReferenceData,
}

impl<'a> CareerPathBuilder<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Build the ordered career path.
    ///
    /// Returns an empty path when education ends at or after the reference
    /// year, or when there is no education path to start from.
    pub fn build<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        profile: &DemographicProfile,
        education: &[EducationStage],
    ) -> Result<Vec<CareerStage>, GeneratorError> {
        let Some(education_end) = education.iter().map(|stage| stage.end_year).max() else {
            return Ok(Vec::new());
        };
        let reference_year = profile.reference_year;
        let start_year = education_end + 1;
        if start_year >= reference_year {
            return Ok(Vec::new());
        }

        let sector = self
            .data
            .sector(&profile.sector)
            .ok_or_else(|| ConfigError::UnknownSector(profile.sector.clone()))?;

        let mut stages = Vec::new();
        let mut cursor = start_year;

        for (rung, position) in sector.ladder.iter().enumerate() {
            if cursor >= reference_year {
                break;
            }

            let tenure = self.draw_tenure(rng, rung)?;
            let end_year = (cursor + tenure as i32).min(reference_year);
            let employer_size = self.draw_employer_size(rng, rung)?;
            let employer = self.draw_employer(rng, sector, employer_size)?;
            let workload = self.draw_workload(rng, profile)?;

            stages.push(CareerStage {
                position: position.clone(),
                employer,
                employer_size,
                location: profile.locality.settlement.clone(),
                start_year: cursor,
                end_year: (end_year < reference_year).then_some(end_year),
                workload,
                employment_type: EmploymentType::Permanent,
            });

            cursor = end_year;
        }

        Ok(stages)
    }

    fn draw_tenure<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        rung: usize,
    ) -> Result<u32, GeneratorError> {
        let range = self
            .data
            .career
            .tenure_for(rung)
            .ok_or_else(|| GeneratorError::EmptyPool("career tenure".to_string()))?;
        Ok(uniform_int(rng, range.min, range.max))
    }

    fn draw_employer_size<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        rung: usize,
    ) -> Result<EmployerSize, GeneratorError> {
        let weights = self
            .data
            .career
            .size_weights_for(rung)
            .ok_or_else(|| GeneratorError::EmptyPool("employer size weights".to_string()))?;
        let table = weights.as_table();
        let values: Vec<f64> = table.iter().map(|(_, w)| *w).collect();
        Ok(table[weighted_index(rng, &values)?].0)
    }

    /// Sector-specific employers when the sector has them for this size,
    /// otherwise the generic pool.
    fn draw_employer<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        sector: &SectorData,
        size: EmployerSize,
    ) -> Result<String, GeneratorError> {
        let pool = sector
            .employers_for(size)
            .unwrap_or_else(|| self.data.employers.pool(size));
        Ok(choose(rng, pool, "employers")?.clone())
    }

    fn draw_workload<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        profile: &DemographicProfile,
    ) -> Result<Workload, GeneratorError> {
        let rule = &self.data.part_time;
        if profile.gender == rule.gender && bernoulli(rng, rule.probability) {
            let percent = choose(rng, &rule.workloads, "part-time workloads")?;
            return Ok(Workload(*percent));
        }
        Ok(Workload::FULL_TIME)
    }
}
