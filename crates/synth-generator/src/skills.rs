//! Language, skill and leisure assembly.

use crate::error::GeneratorError;
use crate::sampler::{sample_distinct, uniform_int, weighted_index};
use rand::RngCore;
use synth_core::reference::{ProficiencyWeights, ReferenceData};
use synth_core::{DemographicProfile, LanguageSkill, Proficiency, SkillProfile};

/// Assembles skill profiles and leisure activities.
pub struct SkillProfileAssembler<'a> {
    data: &'a ReferenceData,
}

impl<'a> SkillProfileAssembler<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    pub fn build<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        profile: &DemographicProfile,
    ) -> Result<SkillProfile, GeneratorError> {
        let languages = self.languages(rng, profile)?;

        let skills = &self.data.skills;
        let pool = self
            .data
            .sector(&profile.sector)
            .map(|sector| sector.skills.as_slice())
            .filter(|pool| !pool.is_empty())
            .unwrap_or(&skills.fallback);
        let professional_skills = sample_distinct(rng, pool, skills.professional_count);

        let it_count = uniform_int(rng, skills.it_count.min, skills.it_count.max);
        let it_skills = sample_distinct(rng, &skills.it, it_count as usize);

        Ok(SkillProfile {
            languages,
            professional_skills,
            it_skills,
        })
    }

    /// Native primary language, then other national languages, then the
    /// foreign language.
    fn languages<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        profile: &DemographicProfile,
    ) -> Result<Vec<LanguageSkill>, GeneratorError> {
        let rules = &self.data.languages;
        let mut languages = vec![LanguageSkill {
            language: profile.primary_language.clone(),
            proficiency: Proficiency::Native,
        }];

        let others = rules
            .national
            .iter()
            .filter(|lang| **lang != profile.primary_language)
            .take(rules.max_other_national);
        for language in others {
            languages.push(LanguageSkill {
                language: language.clone(),
                proficiency: draw_proficiency(rng, &rules.national_weights)?,
            });
        }

        if rules.foreign != profile.primary_language {
            languages.push(LanguageSkill {
                language: rules.foreign.clone(),
                proficiency: draw_proficiency(rng, &rules.foreign_weights)?,
            });
        }

        Ok(languages)
    }

    /// Random count of distinct leisure activities.
    pub fn leisure_activities<R: RngCore + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let skills = &self.data.skills;
        let count = uniform_int(rng, skills.leisure_count.min, skills.leisure_count.max);
        sample_distinct(rng, &skills.leisure, count as usize)
    }
}

fn draw_proficiency<R: RngCore + ?Sized>(
    rng: &mut R,
    weights: &ProficiencyWeights,
) -> Result<Proficiency, GeneratorError> {
    let table = weights.as_table();
    let values: Vec<f64> = table.iter().map(|(_, w)| *w).collect();
    Ok(table[weighted_index(rng, &values)?].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use synth_core::{Gender, Locality, Region};

    fn profile(language: &str, sector: &str) -> DemographicProfile {
        DemographicProfile {
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
            region: Region::FrenchSpeaking,
            locality: Locality::new("Genève", "Genève"),
            gender: Gender::Female,
            age: 33,
            reference_year: 2024,
            primary_language: language.to_string(),
            sector: sector.to_string(),
        }
    }

    #[test]
    fn test_language_map_order_and_levels() {
        let data = ReferenceData::swiss().unwrap();
        let assembler = SkillProfileAssembler::new(&data);
        // deutsch basic, italiano fluent, english very good
        let mut rng = ScriptedRng::units(&[0.0, 0.99, 0.6]);
        let languages = assembler.languages(&mut rng, &profile("français", "education")).unwrap();

        let pairs: Vec<_> = languages
            .iter()
            .map(|l| (l.language.as_str(), l.proficiency))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("français", Proficiency::Native),
                ("deutsch", Proficiency::Basic),
                ("italiano", Proficiency::Fluent),
                ("english", Proficiency::VeryGood),
            ]
        );
    }

    #[test]
    fn test_skill_sets_are_distinct_and_sized() {
        let data = ReferenceData::swiss().unwrap();
        let assembler = SkillProfileAssembler::new(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        for sector in data.sector_keys() {
            for _ in 0..50 {
                let skills = assembler.build(&mut rng, &profile("deutsch", sector)).unwrap();

                let pool = &data.sector(sector).unwrap().skills;
                assert_eq!(skills.professional_skills.len(), pool.len().min(4));
                assert!(skills.professional_skills.iter().all(|s| pool.contains(s)));
                let unique: HashSet<_> = skills.professional_skills.iter().collect();
                assert_eq!(unique.len(), skills.professional_skills.len());

                assert!((2..=4).contains(&skills.it_skills.len()));
                let unique: HashSet<_> = skills.it_skills.iter().collect();
                assert_eq!(unique.len(), skills.it_skills.len());

                assert_eq!(skills.proficiency("deutsch"), Some(Proficiency::Native));
                assert!(skills.proficiency("english").is_some());
            }
        }
    }

    #[test]
    fn test_unknown_sector_uses_fallback_pool() {
        let data = ReferenceData::swiss().unwrap();
        let assembler = SkillProfileAssembler::new(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let skills = assembler.build(&mut rng, &profile("italiano", "unlisted")).unwrap();

        let mut found = skills.professional_skills.clone();
        found.sort();
        assert_eq!(found, vec!["Kommunikation".to_string(), "Teamwork".to_string()]);
    }

    #[test]
    fn test_leisure_activities() {
        let data = ReferenceData::swiss().unwrap();
        let assembler = SkillProfileAssembler::new(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..100 {
            let leisure = assembler.leisure_activities(&mut rng);
            assert!((2..=4).contains(&leisure.len()));
            let unique: HashSet<_> = leisure.iter().collect();
            assert_eq!(unique.len(), leisure.len());
            assert!(leisure.iter().all(|a| data.skills.leisure.contains(a)));
        }
    }
}
