//! Batch validation against reference targets.

use crate::error::ValidationError;
use crate::report::{CategoryShare, Metric, MetricDetail, MetricResult, ValidationReport};
use crate::statistics::BatchStatistics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use synth_core::{Record, ValidationTargets};
use tracing::{info, warn};

/// Per-metric pass thresholds, in percentage points unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Largest allowed gender deviation
    pub gender: f64,
    /// Largest allowed region deviation
    pub region: f64,
    /// Largest allowed vocational-track deviation
    pub education: f64,
    /// Smallest required coverage of known sectors
    pub sector_coverage: f64,
    /// Width of the window the batch min/max age must fall into, in years
    pub age_window: u32,
    /// Largest allowed mean-age deviation, in years
    pub age_mean: f64,
    /// Fraction of metrics that must pass for the batch to pass
    pub overall_pass_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            gender: 5.0,
            region: 8.0,
            education: 10.0,
            sector_coverage: 70.0,
            age_window: 5,
            age_mean: 5.0,
            overall_pass_ratio: 0.8,
        }
    }
}

/// Scores batches against target distributions.
#[derive(Debug, Clone)]
pub struct StatisticsValidator {
    targets: ValidationTargets,
    thresholds: Thresholds,
}

impl StatisticsValidator {
    pub fn new(targets: ValidationTargets) -> Self {
        Self {
            targets,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Validate a batch.
    ///
    /// An empty batch yields [`ValidationError::EmptyBatch`].
    pub fn validate(&self, records: &[Record]) -> Result<ValidationReport, ValidationError> {
        let stats = BatchStatistics::collect(records).ok_or(ValidationError::EmptyBatch)?;

        let metrics = vec![
            self.check_gender(&stats),
            self.check_region(&stats),
            self.check_education(&stats),
            self.check_sectors(&stats),
            self.check_age(&stats),
        ];

        for result in metrics.iter().filter(|m| !m.passed) {
            warn!(
                metric = result.metric.label(),
                deviation = result.deviation,
                threshold = result.threshold,
                "Metric failed"
            );
        }

        let passed = metrics.iter().filter(|m| m.passed).count();
        let total = metrics.len();
        let overall_passed = passed as f64 >= total as f64 * self.thresholds.overall_pass_ratio;
        info!(records = stats.total, passed, total, overall_passed, "Validated batch");

        Ok(ValidationReport {
            total_records: stats.total,
            failed: total - passed,
            pass_rate: passed as f64 / total as f64 * 100.0,
            passed,
            overall_passed,
            metrics,
            statistics: stats,
        })
    }

    fn check_gender(&self, stats: &BatchStatistics) -> MetricResult {
        let categories: BTreeMap<String, CategoryShare> = self
            .targets
            .gender
            .iter()
            .map(|(gender, target)| {
                let share = CategoryShare {
                    count: stats.genders.get(gender).copied().unwrap_or(0),
                    actual: stats.gender_percent(*gender),
                    target: *target,
                };
                (gender.to_string(), share)
            })
            .collect();
        distribution(Metric::Gender, categories, self.thresholds.gender)
    }

    fn check_region(&self, stats: &BatchStatistics) -> MetricResult {
        let categories: BTreeMap<String, CategoryShare> = self
            .targets
            .regions
            .iter()
            .map(|(region, target)| {
                let share = CategoryShare {
                    count: stats.regions.get(region).copied().unwrap_or(0),
                    actual: stats.region_percent(*region),
                    target: *target,
                };
                (region.to_string(), share)
            })
            .collect();
        distribution(Metric::Region, categories, self.thresholds.region)
    }

    fn check_education(&self, stats: &BatchStatistics) -> MetricResult {
        let actual = stats.vocational_percent();
        let target = self.targets.vocational_percent;
        let deviation = (actual - target).abs();
        let e = &stats.education;
        let breakdown = BTreeMap::from([
            ("vocational".to_string(), stats.percent(e.vocational)),
            ("higher_vocational".to_string(), stats.percent(e.higher_vocational)),
            ("university".to_string(), stats.percent(e.university)),
            ("other".to_string(), stats.percent(e.other)),
        ]);

        MetricResult {
            metric: Metric::Education,
            passed: deviation < self.thresholds.education,
            deviation,
            threshold: self.thresholds.education,
            detail: MetricDetail::VocationalShare {
                actual,
                target,
                breakdown,
            },
        }
    }

    fn check_sectors(&self, stats: &BatchStatistics) -> MetricResult {
        let categories: BTreeMap<String, CategoryShare> = self
            .targets
            .sectors
            .iter()
            .map(|(sector, target)| {
                let share = CategoryShare {
                    count: stats.sectors.get(sector).copied().unwrap_or(0),
                    actual: stats.sector_percent(sector),
                    target: *target,
                };
                (sector.clone(), share)
            })
            .collect();
        let coverage: f64 = categories.values().map(|share| share.actual).sum();

        MetricResult {
            metric: Metric::Sector,
            passed: coverage > self.thresholds.sector_coverage,
            deviation: coverage,
            threshold: self.thresholds.sector_coverage,
            detail: MetricDetail::Coverage {
                coverage,
                categories,
            },
        }
    }

    fn check_age(&self, stats: &BatchStatistics) -> MetricResult {
        let target = &self.targets.age;
        let window = self.thresholds.age_window;
        let age = stats.age;
        let deviation = (age.mean - target.mean).abs();

        let min_ok = (target.min..=target.min + window).contains(&age.min);
        let max_ok = (target.max.saturating_sub(window)..=target.max).contains(&age.max);
        let mean_ok = deviation < self.thresholds.age_mean;

        MetricResult {
            metric: Metric::Age,
            passed: min_ok && max_ok && mean_ok,
            deviation,
            threshold: self.thresholds.age_mean,
            detail: MetricDetail::Age {
                mean: age.mean,
                median: age.median,
                min: age.min,
                max: age.max,
                target_mean: target.mean,
                target_min: target.min,
                target_max: target.max,
            },
        }
    }
}

fn distribution(
    metric: Metric,
    categories: BTreeMap<String, CategoryShare>,
    threshold: f64,
) -> MetricResult {
    let deviation = categories
        .values()
        .map(CategoryShare::deviation)
        .fold(0.0, f64::max);
    MetricResult {
        metric,
        passed: deviation < threshold,
        deviation,
        threshold,
        detail: MetricDetail::Distribution { categories },
    }
}
