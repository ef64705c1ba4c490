//! Demographic profile sampling.
//!
//! The profile is drawn as a cascade: region, locality, gender, age bracket,
//! age within the bracket, names, sector. Each step conditions the next one
//! through the region's configuration.

use crate::error::GeneratorError;
use crate::sampler::{choose, uniform_int, weighted_index};
use rand::RngCore;
use synth_core::reference::ReferenceData;
use synth_core::DemographicProfile;

/// Draws demographic profiles from reference data.
pub struct DemographicProfileGenerator<'a> {
    data: &'a ReferenceData,
    reference_year: i32,
}

impl<'a> DemographicProfileGenerator<'a> {
    pub fn new(data: &'a ReferenceData, reference_year: i32) -> Self {
        Self {
            data,
            reference_year,
        }
    }

    pub fn generate<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<DemographicProfile, GeneratorError> {
        let data = self.data;

        let shares: Vec<f64> = data.regions.iter().map(|r| r.share).collect();
        let region = &data.regions[weighted_index(rng, &shares)?];

        let locality = choose(rng, &region.localities, "localities")?.clone();

        let gender_weights: Vec<f64> = data.genders.iter().map(|g| g.weight).collect();
        let gender = data.genders[weighted_index(rng, &gender_weights)?].value;

        let age = self.draw_age(rng)?;

        let names = data.names_for(&region.language)?;
        let first_name = choose(rng, names.given_names(gender), "given names")?.clone();
        let last_name = choose(rng, &names.surnames, "surnames")?.clone();

        let sector_shares: Vec<f64> = data.sectors.iter().map(|s| s.share).collect();
        let sector = data.sectors[weighted_index(rng, &sector_shares)?].key.clone();

        Ok(DemographicProfile {
            first_name,
            last_name,
            region: region.region,
            locality,
            gender,
            age,
            reference_year: self.reference_year,
            primary_language: region.language.clone(),
            sector,
        })
    }

    /// Bracket first, then uniform inside the bracket.
    fn draw_age<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<u32, GeneratorError> {
        let brackets = &self.data.age_brackets;
        let weights: Vec<f64> = brackets.iter().map(|b| b.weight).collect();
        let bracket = brackets[weighted_index(rng, &weights)?];
        Ok(uniform_int(rng, bracket.low, bracket.high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;
    use synth_core::reference::AgeBracket;
    use synth_core::{Gender, Region};

    fn swiss() -> ReferenceData {
        ReferenceData::swiss().unwrap()
    }

    #[test]
    fn test_profile_is_coherent() {
        let data = swiss();
        let generator = DemographicProfileGenerator::new(&data, 2024);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..500 {
            let profile = generator.generate(&mut rng).unwrap();
            let region = data.region(profile.region).unwrap();

            assert_eq!(profile.primary_language, region.language);
            assert!(region.localities.contains(&profile.locality));
            assert!((22..=65).contains(&profile.age));
            assert_eq!(profile.birth_year(), 2024 - profile.age as i32);

            let names = data.names_for(&region.language).unwrap();
            assert!(names.given_names(profile.gender).contains(&profile.first_name));
            assert!(names.surnames.contains(&profile.last_name));
            assert!(data.sector(&profile.sector).is_some());
        }
    }

    #[test]
    fn test_scripted_cascade() {
        let data = swiss();
        let generator = DemographicProfileGenerator::new(&data, 2024);
        // region, locality, gender, bracket, age, first, last, sector
        let mut rng = ScriptedRng::units(&[0.99, 0.0, 0.99, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let profile = generator.generate(&mut rng).unwrap();

        assert_eq!(profile.region, Region::ItalianSpeaking);
        assert_eq!(profile.locality.settlement, "Lugano");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.age, 22);
        assert_eq!(profile.first_name, "Maria");
        assert_eq!(profile.last_name, "Rossi");
        assert_eq!(profile.sector, "commercial_administrative");
        assert_eq!(rng.position(), 8);
    }

    #[test]
    fn test_age_follows_brackets() {
        let mut data = swiss();
        data.age_brackets = vec![
            AgeBracket { low: 22, high: 30, weight: 0.0 },
            AgeBracket { low: 40, high: 41, weight: 1.0 },
        ];
        let generator = DemographicProfileGenerator::new(&data, 2024);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut seen = BTreeMap::new();
        for _ in 0..200 {
            let profile = generator.generate(&mut rng).unwrap();
            *seen.entry(profile.age).or_insert(0) += 1;
        }
        assert_eq!(seen.keys().copied().collect::<Vec<_>>(), vec![40, 41]);
    }

    #[test]
    fn test_fixture_region_weights_are_honoured() {
        let mut data = swiss();
        for region in &mut data.regions {
            region.share = if region.region == Region::FrenchSpeaking { 1.0 } else { 0.0 };
        }
        let generator = DemographicProfileGenerator::new(&data, 2024);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let profile = generator.generate(&mut rng).unwrap();
            assert_eq!(profile.region, Region::FrenchSpeaking);
            assert_eq!(profile.primary_language, "français");
        }
    }

    #[test]
    fn test_malformed_weights_propagate() {
        let mut data = swiss();
        for gender in &mut data.genders {
            gender.weight = 0.0;
        }
        let generator = DemographicProfileGenerator::new(&data, 2024);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generator.generate(&mut rng),
            Err(GeneratorError::InvalidDistribution(_))
        ));
    }
}
