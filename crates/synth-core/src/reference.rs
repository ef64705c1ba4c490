//! Reference data driving generation and validation.
//!
//! Reference data is plain configuration: name lists, institutions, employers,
//! regional and sector statistics, branch probabilities and validation
//! targets. It is loaded from YAML and injected into the generator at
//! construction time, so tests can substitute small fixtures.
//!
//! All weight tables are ordered lists. Order matters: the weighted draw scans
//! entries in list order, so reordering a table changes which record a seed
//! produces.

use crate::error::{check_pool, check_weights, ConfigError};
use crate::record::Locality;
use crate::types::{EmployerSize, Gender, Proficiency, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Bundled Swiss labor-market dataset.
const SWISS_YAML: &str = include_str!("../data/swiss.yaml");

/// A value paired with its sampling weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn check(&self, table: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                table: table.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Weights for the vocational/academic branch after mandatory schooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteWeights {
    pub vocational: f64,
    pub academic: f64,
}

/// Per-region configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    pub region: Region,
    /// Population share used as the region sampling weight.
    pub share: f64,
    pub language: String,
    pub localities: Vec<Locality>,
    pub route: RouteWeights,
    pub vocational_schools: Vec<String>,
    pub academic_schools: Vec<String>,
    pub universities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamePool {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub surnames: Vec<String>,
}

impl NamePool {
    pub fn given_names(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}

/// Which gender is drawn part-time workloads and how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartTimeRule {
    pub gender: Gender,
    pub probability: f64,
    /// Part-time workloads in percent, drawn uniformly.
    pub workloads: Vec<u8>,
}

/// Age bracket with its labor-participation weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub low: u32,
    pub high: u32,
    pub weight: f64,
}

/// Employer names keyed by size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerPools {
    pub small: Vec<String>,
    pub medium: Vec<String>,
    pub large: Vec<String>,
}

impl EmployerPools {
    pub fn pool(&self, size: EmployerSize) -> &[String] {
        match size {
            EmployerSize::Small => &self.small,
            EmployerSize::Medium => &self.medium,
            EmployerSize::Large => &self.large,
        }
    }
}

/// Per-sector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorData {
    pub key: String,
    /// Employment share used as the sector sampling weight.
    pub share: f64,
    /// Role names, used as vocational field of study.
    pub roles: Vec<String>,
    /// Ordered progression ladder, entry rung first.
    pub ladder: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Sector-specific employers; sizes missing here fall back to the
    /// generic pools.
    #[serde(default)]
    pub employers: BTreeMap<EmployerSize, Vec<String>>,
}

impl SectorData {
    /// Sector-specific employers for a size, if any are configured.
    pub fn employers_for(&self, size: EmployerSize) -> Option<&[String]> {
        self.employers
            .get(&size)
            .filter(|pool| !pool.is_empty())
            .map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationPools {
    pub mandatory: Vec<String>,
    pub vocational: Vec<String>,
    pub academic_secondary: Vec<String>,
    pub higher_vocational: Vec<String>,
    pub bachelor: Vec<String>,
    pub master: Vec<String>,
}

/// Branch probabilities and institution templates for education paths.
///
/// Templates may contain `{subdivision}` and `{settlement}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRules {
    pub higher_vocational_probability: f64,
    /// Higher vocational education is only drawn when age is above this.
    pub higher_vocational_min_age: u32,
    pub bachelor_probability: f64,
    pub master_probability: f64,
    pub mandatory_institution: String,
    pub higher_vocational_institution: String,
}

/// Employer size weights for one rung of a progression ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeWeights {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl SizeWeights {
    pub fn as_table(&self) -> [(EmployerSize, f64); 3] {
        [
            (EmployerSize::Small, self.small),
            (EmployerSize::Medium, self.medium),
            (EmployerSize::Large, self.large),
        ]
    }
}

/// Tenure and employer-size rules per rung.
///
/// Both lists are indexed by rung; rungs past the end use the last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRules {
    pub tenure: Vec<Range>,
    pub employer_size_weights: Vec<SizeWeights>,
}

impl CareerRules {
    pub fn tenure_for(&self, rung: usize) -> Option<Range> {
        self.tenure.get(rung).or_else(|| self.tenure.last()).copied()
    }

    pub fn size_weights_for(&self, rung: usize) -> Option<SizeWeights> {
        self.employer_size_weights
            .get(rung)
            .or_else(|| self.employer_size_weights.last())
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyWeights {
    pub basic: f64,
    pub good: f64,
    pub very_good: f64,
    pub fluent: f64,
}

impl ProficiencyWeights {
    pub fn as_table(&self) -> [(Proficiency, f64); 4] {
        [
            (Proficiency::Basic, self.basic),
            (Proficiency::Good, self.good),
            (Proficiency::VeryGood, self.very_good),
            (Proficiency::Fluent, self.fluent),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRules {
    /// Languages spoken across the regions, in assignment order.
    pub national: Vec<String>,
    /// How many non-primary national languages are assigned.
    #[serde(default = "default_other_national")]
    pub max_other_national: usize,
    pub national_weights: ProficiencyWeights,
    /// The always-assigned foreign language (English).
    pub foreign: String,
    pub foreign_weights: ProficiencyWeights,
}

fn default_other_national() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPools {
    /// Used when a sector has no skill pool.
    pub fallback: Vec<String>,
    #[serde(default = "default_professional_count")]
    pub professional_count: usize,
    pub it: Vec<String>,
    pub it_count: Range,
    pub leisure: Vec<String>,
    pub leisure_count: Range,
}

fn default_professional_count() -> usize {
    4
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeTarget {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

/// Reference distributions the validator compares batches against.
///
/// Percentages are on a 0-100 scale. They are targets only and never steer
/// generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationTargets {
    pub gender: BTreeMap<Gender, f64>,
    pub regions: BTreeMap<Region, f64>,
    pub vocational_percent: f64,
    pub sectors: BTreeMap<String, f64>,
    pub age: AgeTarget,
}

/// Complete reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub name: String,
    pub regions: Vec<RegionData>,
    pub names: BTreeMap<String, NamePool>,
    pub genders: Vec<Weighted<Gender>>,
    pub part_time: PartTimeRule,
    pub age_brackets: Vec<AgeBracket>,
    pub sectors: Vec<SectorData>,
    pub employers: EmployerPools,
    pub qualifications: QualificationPools,
    pub education: EducationRules,
    pub career: CareerRules,
    pub languages: LanguageRules,
    pub skills: SkillPools,
    pub targets: ValidationTargets,
}

impl ReferenceData {
    /// Parse and validate reference data from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let data: ReferenceData = serde_yaml::from_str(yaml)?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate reference data from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// The bundled Swiss labor-market dataset.
    pub fn swiss() -> Result<Self, ConfigError> {
        Self::from_yaml(SWISS_YAML)
    }

    pub fn region(&self, region: Region) -> Result<&RegionData, ConfigError> {
        self.regions
            .iter()
            .find(|r| r.region == region)
            .ok_or_else(|| ConfigError::UnknownRegion(region.to_string()))
    }

    pub fn sector(&self, key: &str) -> Option<&SectorData> {
        self.sectors.iter().find(|s| s.key == key)
    }

    pub fn names_for(&self, language: &str) -> Result<&NamePool, ConfigError> {
        self.names
            .get(language)
            .ok_or_else(|| ConfigError::UnknownLanguage(language.to_string()))
    }

    pub fn sector_keys(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.key.as_str()).collect()
    }

    /// Check every table generation draws from.
    ///
    /// Runs on load; a dataset that passes can be sampled without hitting a
    /// configuration error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weights("regions", self.regions.iter().map(|r| r.share))?;
        for region in &self.regions {
            let table = region.region.as_str();
            check_pool(&format!("{table}.localities"), &region.localities)?;
            check_weights(
                &format!("{table}.route"),
                [region.route.vocational, region.route.academic],
            )?;
            check_pool(&format!("{table}.vocational_schools"), &region.vocational_schools)?;
            check_pool(&format!("{table}.academic_schools"), &region.academic_schools)?;
            check_pool(&format!("{table}.universities"), &region.universities)?;

            let names = self.names_for(&region.language)?;
            check_pool(&format!("names.{}.male", region.language), &names.male)?;
            check_pool(&format!("names.{}.female", region.language), &names.female)?;
            check_pool(&format!("names.{}.surnames", region.language), &names.surnames)?;
        }

        check_weights("genders", self.genders.iter().map(|g| g.weight))?;
        check_probability("part_time.probability", self.part_time.probability)?;
        check_pool("part_time.workloads", &self.part_time.workloads)?;

        check_weights("age_brackets", self.age_brackets.iter().map(|b| b.weight))?;
        for bracket in &self.age_brackets {
            Range::new(bracket.low, bracket.high).check("age_brackets")?;
        }

        check_weights("sectors", self.sectors.iter().map(|s| s.share))?;
        for sector in &self.sectors {
            check_pool(&format!("sectors.{}.roles", sector.key), &sector.roles)?;
            check_pool(&format!("sectors.{}.ladder", sector.key), &sector.ladder)?;
        }

        for size in EmployerSize::ALL {
            check_pool(&format!("employers.{size}"), self.employers.pool(size))?;
        }

        let q = &self.qualifications;
        check_pool("qualifications.mandatory", &q.mandatory)?;
        check_pool("qualifications.vocational", &q.vocational)?;
        check_pool("qualifications.academic_secondary", &q.academic_secondary)?;
        check_pool("qualifications.higher_vocational", &q.higher_vocational)?;
        check_pool("qualifications.bachelor", &q.bachelor)?;
        check_pool("qualifications.master", &q.master)?;

        let e = &self.education;
        check_probability(
            "education.higher_vocational_probability",
            e.higher_vocational_probability,
        )?;
        check_probability("education.bachelor_probability", e.bachelor_probability)?;
        check_probability("education.master_probability", e.master_probability)?;

        check_pool("career.tenure", &self.career.tenure)?;
        for range in &self.career.tenure {
            range.check("career.tenure")?;
        }
        check_pool("career.employer_size_weights", &self.career.employer_size_weights)?;
        for weights in &self.career.employer_size_weights {
            check_weights(
                "career.employer_size_weights",
                weights.as_table().iter().map(|(_, w)| *w),
            )?;
        }

        let l = &self.languages;
        check_weights(
            "languages.national_weights",
            l.national_weights.as_table().iter().map(|(_, w)| *w),
        )?;
        check_weights(
            "languages.foreign_weights",
            l.foreign_weights.as_table().iter().map(|(_, w)| *w),
        )?;

        check_pool("skills.fallback", &self.skills.fallback)?;
        check_pool("skills.it", &self.skills.it)?;
        check_pool("skills.leisure", &self.skills.leisure)?;
        self.skills.it_count.check("skills.it_count")?;
        self.skills.leisure_count.check("skills.leisure_count")?;

        Ok(())
    }
}

fn check_probability(table: &str, p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::invalid_distribution(
            table,
            format!("probability {p} outside [0, 1]"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_dataset_loads() {
        let data = ReferenceData::swiss().unwrap();
        assert_eq!(data.regions.len(), 3);
        assert_eq!(data.sectors.len(), 8);
        assert_eq!(data.age_brackets.len(), 4);
        assert!(data.sector("finance_banking").is_some());
        assert!(data.sector("astronautics").is_none());
    }

    #[test]
    fn test_region_lookup() {
        let data = ReferenceData::swiss().unwrap();
        let ticino = data.region(Region::ItalianSpeaking).unwrap();
        assert_eq!(ticino.language, "italiano");
        assert!(data.names_for(&ticino.language).is_ok());
    }

    #[test]
    fn test_sector_employers_fallback() {
        let data = ReferenceData::swiss().unwrap();
        let finance = data.sector("finance_banking").unwrap();
        assert!(finance.employers_for(EmployerSize::Large).is_some());

        let education = data.sector("education").unwrap();
        assert!(education.employers_for(EmployerSize::Large).is_none());
    }

    #[test]
    fn test_career_rules_clamp_to_last_rung() {
        let data = ReferenceData::swiss().unwrap();
        let senior = data.career.tenure_for(2).unwrap();
        assert_eq!(data.career.tenure_for(10), Some(senior));
        assert_eq!(data.career.tenure_for(0), Some(Range::new(2, 4)));
    }

    #[test]
    fn test_validate_rejects_zero_region_shares() {
        let mut data = ReferenceData::swiss().unwrap();
        for region in &mut data.regions {
            region.share = 0.0;
        }
        let result = data.validate();
        assert!(matches!(result, Err(ConfigError::InvalidDistribution { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_ladder() {
        let mut data = ReferenceData::swiss().unwrap();
        data.sectors[0].ladder.clear();
        assert!(matches!(data.validate(), Err(ConfigError::EmptyPool { .. })));
    }

    #[test]
    fn test_validate_rejects_inverted_bracket() {
        let mut data = ReferenceData::swiss().unwrap();
        data.age_brackets[0] = AgeBracket {
            low: 40,
            high: 30,
            weight: 1.0,
        };
        assert!(matches!(data.validate(), Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn test_validate_rejects_missing_name_pool() {
        let mut data = ReferenceData::swiss().unwrap();
        data.names.remove("français");
        assert!(matches!(
            data.validate(),
            Err(ConfigError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_from_yaml_reports_parse_errors() {
        let result = ReferenceData::from_yaml("regions: [");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
