//! Career-profile generator for career-synth.
//!
//! This crate provides the `RecordGenerator` which produces deterministic
//! synthetic career profiles from [`synth_core::ReferenceData`]. Every record
//! is drawn from its own ChaCha sub-stream derived from the base seed and the
//! record index, so the same seed always reproduces the same batch.
//!
//! # Architecture
//!
//! ```text
//! ReferenceData (YAML)
//!        │
//!        ▼
//! ┌──────────────────────────────┐
//! │  RecordGenerator             │
//! │                              │
//! │  DemographicProfileGenerator │
//! │  EducationPathBuilder        │
//! │  CareerPathBuilder           │
//! │  SkillProfileAssembler       │
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//!    Record { id, profile, education, career, skills, ... }
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::ReferenceData;
//! use synth_generator::{GeneratorOptions, RecordGenerator};
//!
//! let data = ReferenceData::swiss().unwrap();
//! let mut generator = RecordGenerator::new(data, GeneratorOptions::new(42)).unwrap();
//! let record = generator.next_record().unwrap();
//! println!("Generated {}", record.profile.full_name());
//! ```

pub mod career;
pub mod demographic;
pub mod education;
pub mod error;
pub mod generator;
pub mod identity;
pub mod sampler;
pub mod skills;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use career::CareerPathBuilder;
pub use demographic::DemographicProfileGenerator;
pub use education::{EducationPathBuilder, EducationState, Transition};
pub use error::GeneratorError;
pub use generator::{GeneratorOptions, RecordGenerator, RecordIterator};
pub use skills::SkillProfileAssembler;
