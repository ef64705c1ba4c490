//! Core types for the career-synth population generator.
//!
//! This crate provides the foundational types shared by generation,
//! validation and export:
//!
//! - [`Record`] - A complete synthetic career profile
//! - [`DemographicProfile`], [`EducationStage`], [`CareerStage`], [`SkillProfile`] - Record parts
//! - [`ReferenceData`] - Reference tables and target distributions loaded from YAML
//! - [`FlatRow`] - Flat key/value projection for tabular export
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-generator  (samples records from ReferenceData)
//!    ├─── synth-validate   (scores batches against ReferenceData targets)
//!    └─── synth-export     (writes records and flat rows)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{ReferenceData, Region};
//!
//! let data = ReferenceData::swiss().unwrap();
//! let region = data.region(Region::GermanSpeaking).unwrap();
//! assert_eq!(region.language, "deutsch");
//! ```

pub mod error;
pub mod record;
pub mod reference;
pub mod row;
pub mod types;

pub use error::{check_pool, check_weights, ConfigError};
pub use record::{
    CareerStage, DemographicProfile, EducationStage, LanguageSkill, Locality, Record,
    SkillProfile,
};
pub use reference::{ReferenceData, SectorData, ValidationTargets};
pub use row::{FlatRow, FlatValue};
pub use types::{
    EducationLevel, EmployerSize, EmploymentType, Gender, Proficiency, Region, Workload,
};
