//! Aggregate statistics over a batch of records.

use serde::Serialize;
use std::collections::BTreeMap;
use synth_core::{EducationLevel, Gender, Record, Region};

/// Education breakdown by highest level reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EducationBreakdown {
    /// Vocational secondary as highest level
    pub vocational: usize,
    pub higher_vocational: usize,
    /// Bachelor or master
    pub university: usize,
    /// Mandatory schooling or academic secondary only
    pub other: usize,
}

impl EducationBreakdown {
    fn add(&mut self, level: Option<EducationLevel>) {
        match level {
            Some(EducationLevel::VocationalSecondary) => self.vocational += 1,
            Some(EducationLevel::HigherVocational) => self.higher_vocational += 1,
            Some(EducationLevel::Bachelor | EducationLevel::Master) => self.university += 1,
            Some(EducationLevel::Mandatory | EducationLevel::AcademicSecondary) | None => {
                self.other += 1
            }
        }
    }

    /// Records whose highest level is on the vocational track.
    pub fn vocational_track(&self) -> usize {
        self.vocational + self.higher_vocational
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeSummary {
    pub mean: f64,
    /// Upper median for even-sized batches
    pub median: u32,
    pub min: u32,
    pub max: u32,
}

/// Counts collected in one pass over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub genders: BTreeMap<Gender, usize>,
    pub regions: BTreeMap<Region, usize>,
    pub sectors: BTreeMap<String, usize>,
    pub education: EducationBreakdown,
    pub age: AgeSummary,
}

impl BatchStatistics {
    /// Collect statistics; `None` for an empty batch.
    pub fn collect(records: &[Record]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut genders = BTreeMap::new();
        let mut regions = BTreeMap::new();
        let mut sectors = BTreeMap::new();
        let mut education = EducationBreakdown::default();
        let mut ages = Vec::with_capacity(records.len());

        for record in records {
            let profile = &record.profile;
            *genders.entry(profile.gender).or_insert(0) += 1;
            *regions.entry(profile.region).or_insert(0) += 1;
            *sectors.entry(profile.sector.clone()).or_insert(0) += 1;
            education.add(record.highest_education_level());
            ages.push(profile.age);
        }

        ages.sort_unstable();
        let sum: u64 = ages.iter().map(|&a| u64::from(a)).sum();
        let age = AgeSummary {
            mean: sum as f64 / ages.len() as f64,
            median: ages[ages.len() / 2],
            min: ages[0],
            max: ages[ages.len() - 1],
        };

        Some(Self {
            total: records.len(),
            genders,
            regions,
            sectors,
            education,
            age,
        })
    }

    /// Share of `count` in the batch, in percent.
    pub fn percent(&self, count: usize) -> f64 {
        count as f64 / self.total as f64 * 100.0
    }

    pub fn gender_percent(&self, gender: Gender) -> f64 {
        self.percent(self.genders.get(&gender).copied().unwrap_or(0))
    }

    pub fn region_percent(&self, region: Region) -> f64 {
        self.percent(self.regions.get(&region).copied().unwrap_or(0))
    }

    pub fn sector_percent(&self, sector: &str) -> f64 {
        self.percent(self.sectors.get(sector).copied().unwrap_or(0))
    }

    pub fn vocational_percent(&self) -> f64 {
        self.percent(self.education.vocational_track())
    }
}
