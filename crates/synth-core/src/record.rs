//! Generated record entities.
//!
//! Every entity is created once per record and never shared between records.
//! Values that can be derived (birth year, stage durations, experience) are
//! computed on access instead of stored.

use crate::row::{FlatRow, FlatValue};
use crate::types::{
    EducationLevel, EmployerSize, EmploymentType, Gender, Proficiency, Region, Workload,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative subdivision and settlement a profile lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    pub subdivision: String,
    pub settlement: String,
}

impl Locality {
    pub fn new(subdivision: impl Into<String>, settlement: impl Into<String>) -> Self {
        Self {
            subdivision: subdivision.into(),
            settlement: settlement.into(),
        }
    }
}

/// Demographic core of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicProfile {
    pub first_name: String,
    pub last_name: String,
    pub region: Region,
    pub locality: Locality,
    pub gender: Gender,
    pub age: u32,
    /// Year the profile was generated for; birth year is derived from it.
    pub reference_year: i32,
    pub primary_language: String,
    /// Key into the sector reference data.
    pub sector: String,
}

impl DemographicProfile {
    /// Birth year, always exactly `reference_year - age`.
    pub fn birth_year(&self) -> i32 {
        self.reference_year - self.age as i32
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One stage of an education path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationStage {
    pub level: EducationLevel,
    pub institution: String,
    pub start_year: i32,
    pub end_year: i32,
    pub qualification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
}

impl EducationStage {
    pub fn duration_years(&self) -> u32 {
        (self.end_year - self.start_year).max(0) as u32
    }
}

/// One stage of a career path.
///
/// A stage without `end_year` is ongoing at the record's reference year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStage {
    pub position: String,
    pub employer: String,
    pub employer_size: EmployerSize,
    pub location: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub workload: Workload,
    pub employment_type: EmploymentType,
}

impl CareerStage {
    pub fn is_current(&self) -> bool {
        self.end_year.is_none()
    }

    /// End year, with ongoing stages closed at `as_of`.
    pub fn end_or(&self, as_of: i32) -> i32 {
        self.end_year.unwrap_or(as_of)
    }

    /// Stage duration in whole years, with ongoing stages measured up to `as_of`.
    pub fn duration_years(&self, as_of: i32) -> u32 {
        (self.end_or(as_of) - self.start_year).max(0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: Proficiency,
}

/// Languages and skill sets of a record.
///
/// `languages` behaves as a map: each language appears at most once, in the
/// order it was assigned (primary language first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub languages: Vec<LanguageSkill>,
    pub professional_skills: Vec<String>,
    pub it_skills: Vec<String>,
}

impl SkillProfile {
    pub fn proficiency(&self, language: &str) -> Option<Proficiency> {
        self.languages
            .iter()
            .find(|skill| skill.language == language)
            .map(|skill| skill.proficiency)
    }

    pub fn language_names(&self) -> Vec<&str> {
        self.languages.iter().map(|s| s.language.as_str()).collect()
    }
}

/// A complete synthetic career profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub profile: DemographicProfile,
    pub education: Vec<EducationStage>,
    pub career: Vec<CareerStage>,
    pub skills: SkillProfile,
    pub leisure_activities: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Record {
    pub fn reference_year(&self) -> i32 {
        self.profile.reference_year
    }

    /// Sum of career stage durations, ongoing stages counted up to the
    /// reference year.
    pub fn total_experience_years(&self) -> u32 {
        let as_of = self.reference_year();
        self.career.iter().map(|stage| stage.duration_years(as_of)).sum()
    }

    /// The ongoing career stage, if any.
    pub fn current_position(&self) -> Option<&CareerStage> {
        self.career.iter().find(|stage| stage.is_current())
    }

    /// Highest education level by [`EducationLevel::priority`].
    pub fn highest_education_level(&self) -> Option<EducationLevel> {
        self.education
            .iter()
            .map(|stage| stage.level)
            .max_by_key(|level| level.priority())
    }

    /// Year the last education stage ends.
    pub fn education_end_year(&self) -> Option<i32> {
        self.education.iter().map(|stage| stage.end_year).max()
    }

    /// Flat key/value projection for tabular export.
    pub fn to_flat_row(&self) -> FlatRow {
        let p = &self.profile;
        let join = |items: &[String]| items.join("; ");

        let fields = vec![
            ("first_name", FlatValue::text(&p.first_name)),
            ("last_name", FlatValue::text(&p.last_name)),
            ("age", FlatValue::Int(i64::from(p.age))),
            ("birth_year", FlatValue::Int(i64::from(p.birth_year()))),
            ("gender", FlatValue::text(p.gender.as_str())),
            ("subdivision", FlatValue::text(&p.locality.subdivision)),
            ("settlement", FlatValue::text(&p.locality.settlement)),
            ("region", FlatValue::text(p.region.as_str())),
            ("primary_language", FlatValue::text(&p.primary_language)),
            ("sector", FlatValue::text(&p.sector)),
            (
                "education_level",
                FlatValue::optional_text(self.highest_education_level().map(|l| l.as_str())),
            ),
            (
                "total_experience",
                FlatValue::Int(i64::from(self.total_experience_years())),
            ),
            (
                "current_position",
                FlatValue::optional_text(self.current_position().map(|c| c.position.as_str())),
            ),
            ("education_count", FlatValue::Int(self.education.len() as i64)),
            ("career_positions", FlatValue::Int(self.career.len() as i64)),
            (
                "language_count",
                FlatValue::Int(self.skills.languages.len() as i64),
            ),
            (
                "professional_skills_count",
                FlatValue::Int(self.skills.professional_skills.len() as i64),
            ),
            (
                "languages",
                FlatValue::Text(self.skills.language_names().join("; ")),
            ),
            (
                "professional_skills",
                FlatValue::Text(join(&self.skills.professional_skills)),
            ),
            ("it_skills", FlatValue::Text(join(&self.skills.it_skills))),
            (
                "leisure_activities",
                FlatValue::Text(join(&self.leisure_activities)),
            ),
            ("generated_at", FlatValue::Text(self.generated_at.to_rfc3339())),
        ];

        FlatRow::new(self.id, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> Record {
        let profile = DemographicProfile {
            first_name: "Anna".to_string(),
            last_name: "Keller".to_string(),
            region: Region::GermanSpeaking,
            locality: Locality::new("Zürich", "Winterthur"),
            gender: Gender::Female,
            age: 30,
            reference_year: 2024,
            primary_language: "deutsch".to_string(),
            sector: "education".to_string(),
        };
        let birth = profile.birth_year();
        Record {
            id: Uuid::from_u128(7),
            profile,
            education: vec![
                EducationStage {
                    level: EducationLevel::Mandatory,
                    institution: "Primarschule Winterthur".to_string(),
                    start_year: birth + 6,
                    end_year: birth + 15,
                    qualification: "Sekundarschulabschluss".to_string(),
                    field_of_study: None,
                },
                EducationStage {
                    level: EducationLevel::VocationalSecondary,
                    institution: "Berufsfachschule Winterthur".to_string(),
                    start_year: birth + 16,
                    end_year: birth + 19,
                    qualification: "EFZ".to_string(),
                    field_of_study: Some("Ausbilder/in".to_string()),
                },
            ],
            career: vec![
                CareerStage {
                    position: "Klassenlehrer".to_string(),
                    employer: "Alpine Solutions AG".to_string(),
                    employer_size: EmployerSize::Small,
                    location: "Winterthur".to_string(),
                    start_year: birth + 20,
                    end_year: Some(birth + 23),
                    workload: Workload::FULL_TIME,
                    employment_type: EmploymentType::Permanent,
                },
                CareerStage {
                    position: "Fachlehrer".to_string(),
                    employer: "Sika".to_string(),
                    employer_size: EmployerSize::Medium,
                    location: "Winterthur".to_string(),
                    start_year: birth + 23,
                    end_year: None,
                    workload: Workload(80),
                    employment_type: EmploymentType::Permanent,
                },
            ],
            skills: SkillProfile {
                languages: vec![
                    LanguageSkill {
                        language: "deutsch".to_string(),
                        proficiency: Proficiency::Native,
                    },
                    LanguageSkill {
                        language: "english".to_string(),
                        proficiency: Proficiency::Good,
                    },
                ],
                professional_skills: vec!["Didaktik".to_string(), "E-Learning".to_string()],
                it_skills: vec!["E-Mail".to_string(), "Internet".to_string()],
            },
            leisure_activities: vec!["Wandern".to_string(), "Lesen".to_string()],
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_birth_year_is_derived() {
        let record = sample_record();
        assert_eq!(record.profile.birth_year(), 1994);
    }

    #[test]
    fn test_total_experience_counts_ongoing_stage() {
        let record = sample_record();
        // 1994+20..1994+23 = 3 years, then 2017..2024 ongoing = 7 years
        assert_eq!(record.total_experience_years(), 10);
    }

    #[test]
    fn test_current_position() {
        let record = sample_record();
        assert_eq!(record.current_position().unwrap().position, "Fachlehrer");
    }

    #[test]
    fn test_highest_education_level() {
        let record = sample_record();
        assert_eq!(
            record.highest_education_level(),
            Some(EducationLevel::VocationalSecondary)
        );
        assert_eq!(record.education_end_year(), Some(2013));
    }

    #[test]
    fn test_flat_row_projection() {
        let record = sample_record();
        let row = record.to_flat_row();

        assert_eq!(row.id, record.id);
        assert_eq!(row.get("age"), Some(&FlatValue::Int(30)));
        assert_eq!(row.get("birth_year"), Some(&FlatValue::Int(1994)));
        assert_eq!(
            row.get("current_position"),
            Some(&FlatValue::Text("Fachlehrer".to_string()))
        );
        assert_eq!(
            row.get("languages"),
            Some(&FlatValue::Text("deutsch; english".to_string()))
        );
        assert_eq!(row.get("missing_column"), None);
    }

    #[test]
    fn test_skill_lookup() {
        let record = sample_record();
        assert_eq!(record.skills.proficiency("deutsch"), Some(Proficiency::Native));
        assert_eq!(record.skills.proficiency("italiano"), None);
    }

    #[test]
    fn test_record_json_roundtrip_preserves_equality() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
