//! Invariants every generated record must satisfy.

use chrono::{TimeZone, Utc};
use synth_core::{EducationLevel, Proficiency, Record, ReferenceData};
use synth_generator::{GeneratorOptions, RecordGenerator};

const REFERENCE_YEAR: i32 = 2024;

fn batch(seed: u64, count: usize) -> Vec<Record> {
    let options = GeneratorOptions::new(seed)
        .with_reference_year(REFERENCE_YEAR)
        .with_generated_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    RecordGenerator::new(ReferenceData::swiss().unwrap(), options)
        .unwrap()
        .generate_batch(count)
        .unwrap()
}

fn all_records() -> Vec<Record> {
    [1u64, 42, 2024]
        .into_iter()
        .flat_map(|seed| batch(seed, 400))
        .collect()
}

#[test]
fn test_birth_year_and_age_range() {
    for record in all_records() {
        let p = &record.profile;
        assert_eq!(p.birth_year(), REFERENCE_YEAR - p.age as i32);
        assert!((22..=65).contains(&p.age), "age {} out of range", p.age);
    }
}

#[test]
fn test_education_is_chronological_and_starts_mandatory() {
    let mut master_after_bachelor = 0;
    for record in all_records() {
        let education = &record.education;
        assert!(!education.is_empty());
        assert!(education.len() <= 4);
        assert_eq!(education[0].level, EducationLevel::Mandatory);
        assert_eq!(
            education
                .iter()
                .filter(|s| s.level == EducationLevel::Mandatory)
                .count(),
            1
        );

        for stage in education {
            assert!(stage.start_year < stage.end_year);
        }
        for pair in education.windows(2) {
            assert!(
                pair[0].end_year <= pair[1].start_year,
                "{:?} overlaps {:?}",
                pair[0],
                pair[1]
            );
            if pair[0].level == EducationLevel::Bachelor && pair[1].level == EducationLevel::Master {
                assert_eq!(pair[0].end_year, pair[1].start_year);
                master_after_bachelor += 1;
            }
        }
    }
    assert!(master_after_bachelor > 0);
}

#[test]
fn test_tertiary_stages_follow_their_branch() {
    for record in all_records() {
        let levels: Vec<EducationLevel> = record.education.iter().map(|s| s.level).collect();
        if levels.contains(&EducationLevel::Master) {
            assert!(levels.contains(&EducationLevel::Bachelor));
            let bachelor = &record.education[levels.len() - 2];
            let master = &record.education[levels.len() - 1];
            assert_eq!(bachelor.institution, master.institution);
        }
        if levels.contains(&EducationLevel::Bachelor) {
            assert!(levels.contains(&EducationLevel::AcademicSecondary));
        }
        if levels.contains(&EducationLevel::HigherVocational) {
            assert!(levels.contains(&EducationLevel::VocationalSecondary));
            assert!(record.profile.age > 25);
        }
    }
}

#[test]
fn test_career_follows_education() {
    let mut with_career = 0;
    for record in all_records() {
        let Some(first) = record.career.first() else {
            let start = record.education_end_year().unwrap() + 1;
            assert!(start >= REFERENCE_YEAR);
            continue;
        };
        with_career += 1;

        assert_eq!(first.start_year, record.education_end_year().unwrap() + 1);
        for pair in record.career.windows(2) {
            assert_eq!(pair[0].end_year, Some(pair[1].start_year));
        }
        for stage in &record.career {
            assert!(stage.end_or(REFERENCE_YEAR) <= REFERENCE_YEAR);
            if let Some(end) = stage.end_year {
                assert!(end < REFERENCE_YEAR);
            }
        }
        assert!(record.career.iter().filter(|s| s.is_current()).count() <= 1);
    }
    assert!(with_career > 1000);
}

#[test]
fn test_experience_within_working_years() {
    for record in all_records() {
        let age = record.profile.age;
        assert!(
            record.total_experience_years() <= age - 18 + 2,
            "{} years of experience at age {}",
            record.total_experience_years(),
            age
        );
    }
}

#[test]
fn test_language_map() {
    for record in all_records() {
        let skills = &record.skills;
        assert_eq!(skills.languages[0].language, record.profile.primary_language);
        assert_eq!(
            skills.proficiency(&record.profile.primary_language),
            Some(Proficiency::Native)
        );
        assert!(skills.proficiency("english").is_some());

        let names = skills.language_names();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }
}

#[test]
fn test_skill_counts() {
    for record in all_records() {
        let skills = &record.skills;
        assert!(skills.professional_skills.len() <= 4);
        assert!((2..=4).contains(&skills.it_skills.len()));
        assert!((2..=4).contains(&record.leisure_activities.len()));
    }
}
