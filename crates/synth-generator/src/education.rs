//! Education path construction.
//!
//! A path is walked as a state machine. Each state emits at most one stage
//! and names its successors in a transition table built from the region's
//! route weights and the branch probabilities in [`EducationRules`]. Adding a
//! region or changing a split is a data change; the walk itself is fixed.
//!
//! ```text
//! Start ─► Mandatory ─┬─► VocationalSecondary ──(p, age guard)──► HigherVocational ─► Done
//!                     │
//!                     └─► AcademicSecondary ──(p)──► Bachelor ──(p)──► Master ─► Done
//! ```
//!
//! Stage years are fixed offsets from birth year (see
//! [`EducationLevel::year_offsets`]), so stages never overlap.
//!
//! [`EducationRules`]: synth_core::reference::EducationRules

use crate::error::GeneratorError;
use crate::sampler::{bernoulli, choose, weighted_index};
use rand::RngCore;
use synth_core::reference::{ReferenceData, RegionData, SectorData};
use synth_core::{ConfigError, DemographicProfile, EducationLevel, EducationStage};
use tracing::trace;

/// Upper bound on emitted stages; the longest path is mandatory, academic
/// secondary, bachelor, master.
pub const MAX_STAGES: usize = 4;

/// Position of the walk through an education path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationState {
    Start,
    Mandatory,
    VocationalSecondary,
    HigherVocational,
    AcademicSecondary,
    Bachelor,
    Master,
    Done,
}

impl EducationState {
    /// Level of the stage this state emits.
    pub fn level(self) -> Option<EducationLevel> {
        match self {
            EducationState::Mandatory => Some(EducationLevel::Mandatory),
            EducationState::VocationalSecondary => Some(EducationLevel::VocationalSecondary),
            EducationState::HigherVocational => Some(EducationLevel::HigherVocational),
            EducationState::AcademicSecondary => Some(EducationLevel::AcademicSecondary),
            EducationState::Bachelor => Some(EducationLevel::Bachelor),
            EducationState::Master => Some(EducationLevel::Master),
            EducationState::Start | EducationState::Done => None,
        }
    }
}

/// Outgoing edges of a state.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Move without drawing.
    Fixed(EducationState),
    /// Weighted choice among successors.
    Weighted(Vec<(EducationState, f64)>),
    /// Bernoulli draw between two successors.
    Chance {
        probability: f64,
        then: EducationState,
        otherwise: EducationState,
    },
}

/// Builds education paths for profiles.
pub struct EducationPathBuilder<'a> {
    data: &'a ReferenceData,
}

impl<'a> EducationPathBuilder<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Transition table entry for `state` under a given region and age.
    pub fn transition(
        &self,
        state: EducationState,
        region: &RegionData,
        age: u32,
    ) -> Transition {
        let rules = &self.data.education;
        match state {
            EducationState::Start => Transition::Fixed(EducationState::Mandatory),
            EducationState::Mandatory => Transition::Weighted(vec![
                (EducationState::VocationalSecondary, region.route.vocational),
                (EducationState::AcademicSecondary, region.route.academic),
            ]),
            EducationState::VocationalSecondary if age > rules.higher_vocational_min_age => {
                Transition::Chance {
                    probability: rules.higher_vocational_probability,
                    then: EducationState::HigherVocational,
                    otherwise: EducationState::Done,
                }
            }
            EducationState::AcademicSecondary => Transition::Chance {
                probability: rules.bachelor_probability,
                then: EducationState::Bachelor,
                otherwise: EducationState::Done,
            },
            EducationState::Bachelor => Transition::Chance {
                probability: rules.master_probability,
                then: EducationState::Master,
                otherwise: EducationState::Done,
            },
            EducationState::VocationalSecondary
            | EducationState::HigherVocational
            | EducationState::Master
            | EducationState::Done => Transition::Fixed(EducationState::Done),
        }
    }

    /// Build the ordered education path of a profile.
    ///
    /// The mandatory stage is always first.
    pub fn build<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        profile: &DemographicProfile,
    ) -> Result<Vec<EducationStage>, GeneratorError> {
        let region = self.data.region(profile.region)?;
        let sector = self
            .data
            .sector(&profile.sector)
            .ok_or_else(|| ConfigError::UnknownSector(profile.sector.clone()))?;

        let mut stages = Vec::with_capacity(MAX_STAGES);
        // Bachelor and master are taken at the same university.
        let mut university: Option<String> = None;
        let mut state = EducationState::Start;

        while state != EducationState::Done && stages.len() <= MAX_STAGES {
            if let Some(stage) = self.emit(rng, state, profile, region, sector, &mut university)? {
                stages.push(stage);
            }
            state = self.advance(rng, self.transition(state, region, profile.age))?;
            trace!(?state, "education transition");
        }

        Ok(stages)
    }

    fn advance<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        transition: Transition,
    ) -> Result<EducationState, GeneratorError> {
        match transition {
            Transition::Fixed(next) => Ok(next),
            Transition::Weighted(edges) => {
                let weights: Vec<f64> = edges.iter().map(|(_, w)| *w).collect();
                Ok(edges[weighted_index(rng, &weights)?].0)
            }
            Transition::Chance {
                probability,
                then,
                otherwise,
            } => Ok(if bernoulli(rng, probability) { then } else { otherwise }),
        }
    }

    fn emit<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        state: EducationState,
        profile: &DemographicProfile,
        region: &RegionData,
        sector: &SectorData,
        university: &mut Option<String>,
    ) -> Result<Option<EducationStage>, GeneratorError> {
        let Some(level) = state.level() else {
            return Ok(None);
        };
        let rules = &self.data.education;
        let qualifications = &self.data.qualifications;

        let (institution, qualification, field_of_study) = match level {
            EducationLevel::Mandatory => (
                render_template(&rules.mandatory_institution, profile),
                choose(rng, &qualifications.mandatory, "mandatory qualifications")?.clone(),
                None,
            ),
            EducationLevel::VocationalSecondary => {
                let institution = choose(rng, &region.vocational_schools, "vocational schools")?;
                let qualification =
                    choose(rng, &qualifications.vocational, "vocational qualifications")?;
                let field = choose(rng, &sector.roles, "sector roles")?;
                (institution.clone(), qualification.clone(), Some(field.clone()))
            }
            EducationLevel::HigherVocational => (
                render_template(&rules.higher_vocational_institution, profile),
                choose(
                    rng,
                    &qualifications.higher_vocational,
                    "higher vocational qualifications",
                )?
                .clone(),
                None,
            ),
            EducationLevel::AcademicSecondary => {
                let institution = choose(rng, &region.academic_schools, "academic schools")?;
                let qualification = choose(
                    rng,
                    &qualifications.academic_secondary,
                    "academic qualifications",
                )?;
                (institution.clone(), qualification.clone(), None)
            }
            EducationLevel::Bachelor => {
                let institution = choose(rng, &region.universities, "universities")?.clone();
                *university = Some(institution.clone());
                let qualification =
                    choose(rng, &qualifications.bachelor, "bachelor qualifications")?;
                (institution, qualification.clone(), None)
            }
            EducationLevel::Master => {
                let institution = match university {
                    Some(name) => name.clone(),
                    None => choose(rng, &region.universities, "universities")?.clone(),
                };
                let qualification = choose(rng, &qualifications.master, "master qualifications")?;
                (institution, qualification.clone(), None)
            }
        };

        let birth_year = profile.birth_year();
        let (start, end) = level.year_offsets();
        Ok(Some(EducationStage {
            level,
            institution,
            start_year: birth_year + start,
            end_year: birth_year + end,
            qualification,
            field_of_study,
        }))
    }
}

/// Fill `{subdivision}` and `{settlement}` placeholders from the profile.
fn render_template(template: &str, profile: &DemographicProfile) -> String {
    template
        .replace("{subdivision}", &profile.locality.subdivision)
        .replace("{settlement}", &profile.locality.settlement)
}
