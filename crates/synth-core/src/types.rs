//! Categorical types shared by generation, validation and export.
//!
//! All enums serialize as snake_case strings so reference data files and
//! exported records use the same spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language region of a profile.
///
/// The region conditions locality, primary language, names, institutions and
/// the vocational/academic split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    GermanSpeaking,
    FrenchSpeaking,
    ItalianSpeaking,
}

impl Region {
    /// All regions in canonical order.
    pub const ALL: [Region; 3] = [
        Region::GermanSpeaking,
        Region::FrenchSpeaking,
        Region::ItalianSpeaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::GermanSpeaking => "german_speaking",
            Region::FrenchSpeaking => "french_speaking",
            Region::ItalianSpeaking => "italian_speaking",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Education stage level.
///
/// Levels form tiers: `Mandatory` < `VocationalSecondary` / `AcademicSecondary`
/// < `HigherVocational` / `Bachelor` < `Master`. Use [`EducationLevel::tier`]
/// for that ordering and [`EducationLevel::priority`] to pick a single highest
/// level out of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Mandatory,
    VocationalSecondary,
    AcademicSecondary,
    HigherVocational,
    Bachelor,
    Master,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::Mandatory,
        EducationLevel::VocationalSecondary,
        EducationLevel::AcademicSecondary,
        EducationLevel::HigherVocational,
        EducationLevel::Bachelor,
        EducationLevel::Master,
    ];

    /// Ordinal tier of the level (0 = mandatory schooling, 3 = master).
    pub fn tier(&self) -> u8 {
        match self {
            EducationLevel::Mandatory => 0,
            EducationLevel::VocationalSecondary | EducationLevel::AcademicSecondary => 1,
            EducationLevel::HigherVocational | EducationLevel::Bachelor => 2,
            EducationLevel::Master => 3,
        }
    }

    /// Fixed priority used to report the highest level of a path.
    ///
    /// Unlike [`EducationLevel::tier`] this is a total order, so ties inside a
    /// tier are broken deterministically.
    pub fn priority(&self) -> u8 {
        match self {
            EducationLevel::Mandatory => 1,
            EducationLevel::VocationalSecondary => 2,
            EducationLevel::AcademicSecondary => 3,
            EducationLevel::HigherVocational => 4,
            EducationLevel::Bachelor => 5,
            EducationLevel::Master => 6,
        }
    }

    /// Whether the level belongs to the vocational track.
    pub fn is_vocational_track(&self) -> bool {
        matches!(
            self,
            EducationLevel::VocationalSecondary | EducationLevel::HigherVocational
        )
    }

    /// Offsets from birth year as `(start, end)`.
    ///
    /// Offsets are fixed per level so stages of one path never overlap.
    pub fn year_offsets(&self) -> (i32, i32) {
        match self {
            EducationLevel::Mandatory => (6, 15),
            EducationLevel::VocationalSecondary => (16, 19),
            EducationLevel::AcademicSecondary => (16, 19),
            EducationLevel::HigherVocational => (22, 24),
            EducationLevel::Bachelor => (20, 23),
            EducationLevel::Master => (23, 25),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Mandatory => "mandatory",
            EducationLevel::VocationalSecondary => "vocational_secondary",
            EducationLevel::AcademicSecondary => "academic_secondary",
            EducationLevel::HigherVocational => "higher_vocational",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
        }
    }

    /// Human readable label used by text renderings.
    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::Mandatory => "Mandatory schooling",
            EducationLevel::VocationalSecondary => "Vocational training",
            EducationLevel::AcademicSecondary => "Academic secondary school",
            EducationLevel::HigherVocational => "Higher vocational education",
            EducationLevel::Bachelor => "Bachelor studies",
            EducationLevel::Master => "Master studies",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employer size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerSize {
    Small,
    Medium,
    Large,
}

impl EmployerSize {
    pub const ALL: [EmployerSize; 3] = [EmployerSize::Small, EmployerSize::Medium, EmployerSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployerSize::Small => "small",
            EmployerSize::Medium => "medium",
            EmployerSize::Large => "large",
        }
    }
}

impl fmt::Display for EmployerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    Permanent,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Permanent => "permanent",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workload as a whole percentage of a full-time position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workload(pub u8);

impl Workload {
    pub const FULL_TIME: Workload = Workload(100);

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_part_time(&self) -> bool {
        self.0 < 100
    }
}

impl Default for Workload {
    fn default() -> Self {
        Self::FULL_TIME
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Ordinal language proficiency.
///
/// Variants are declared in ascending order so the derived `Ord` is the
/// proficiency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Basic,
    Good,
    VeryGood,
    Fluent,
    Native,
}

impl Proficiency {
    /// The four levels a non-native language can be drawn at, in scale order.
    pub const LEARNED: [Proficiency; 4] = [
        Proficiency::Basic,
        Proficiency::Good,
        Proficiency::VeryGood,
        Proficiency::Fluent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Basic => "basic",
            Proficiency::Good => "good",
            Proficiency::VeryGood => "very_good",
            Proficiency::Fluent => "fluent",
            Proficiency::Native => "native",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
