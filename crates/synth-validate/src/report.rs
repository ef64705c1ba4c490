//! Validation report types.

use crate::statistics::BatchStatistics;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Metrics checked for every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Gender,
    Region,
    Education,
    Sector,
    Age,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Gender => "Gender split",
            Metric::Region => "Region split",
            Metric::Education => "Education paths",
            Metric::Sector => "Sector mix",
            Metric::Age => "Age distribution",
        }
    }
}

/// Actual and target share of one category, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub count: usize,
    pub actual: f64,
    pub target: f64,
}

impl CategoryShare {
    pub fn deviation(&self) -> f64 {
        (self.actual - self.target).abs()
    }
}

/// Metric-specific measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricDetail {
    /// Per-category shares; deviation is the largest category deviation.
    Distribution {
        categories: BTreeMap<String, CategoryShare>,
    },
    /// Vocational-track share against its target.
    VocationalShare {
        actual: f64,
        target: f64,
        /// Percent per highest-level group
        breakdown: BTreeMap<String, f64>,
    },
    /// Share of records in known sectors.
    Coverage {
        coverage: f64,
        categories: BTreeMap<String, CategoryShare>,
    },
    Age {
        mean: f64,
        median: u32,
        min: u32,
        max: u32,
        target_mean: f64,
        target_min: u32,
        target_max: u32,
    },
}

/// Outcome of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub passed: bool,
    /// Deviation the verdict is based on (coverage for the sector mix).
    pub deviation: f64,
    /// Threshold the deviation was checked against.
    pub threshold: f64,
    pub detail: MetricDetail,
}

impl MetricResult {
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Validation report for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub total_records: usize,
    pub metrics: Vec<MetricResult>,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of metrics that passed
    pub pass_rate: f64,
    pub overall_passed: bool,
    pub statistics: BatchStatistics,
}

impl ValidationReport {
    pub fn metric(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    pub fn overall_status(&self) -> &'static str {
        if self.overall_passed {
            "PASS"
        } else {
            "FAIL"
        }
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Validation {}: {}/{} metrics passed over {} records",
            self.overall_status(),
            self.passed,
            self.metrics.len(),
            self.total_records
        )
    }

    /// Render the report as plain text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VALIDATION REPORT")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Records: {}", self.total_records)?;
        writeln!(f)?;

        for result in &self.metrics {
            let label = result.metric.label();
            writeln!(f, "{}", label.to_uppercase())?;
            writeln!(f, "{}", "-".repeat(label.len()))?;
            write_detail(f, &result.detail)?;
            writeln!(f, "Status: {}", result.status())?;
            writeln!(f)?;
        }

        writeln!(f, "SUMMARY")?;
        writeln!(f, "-------")?;
        writeln!(f, "Metrics passed: {}/{}", self.passed, self.metrics.len())?;
        writeln!(f, "Pass rate: {:.1}%", self.pass_rate)?;
        write!(f, "Overall status: {}", self.overall_status())
    }
}

fn write_categories(
    f: &mut fmt::Formatter<'_>,
    categories: &BTreeMap<String, CategoryShare>,
) -> fmt::Result {
    for (name, share) in categories {
        writeln!(
            f,
            "{name}: {:.1}% (target: {:.1}%, deviation: {:.1})",
            share.actual,
            share.target,
            share.deviation()
        )?;
    }
    Ok(())
}

fn write_detail(f: &mut fmt::Formatter<'_>, detail: &MetricDetail) -> fmt::Result {
    match detail {
        MetricDetail::Distribution { categories } => write_categories(f, categories),
        MetricDetail::VocationalShare {
            actual,
            target,
            breakdown,
        } => {
            writeln!(f, "Vocational track: {actual:.1}% (target: {target:.1}%)")?;
            for (group, percent) in breakdown {
                writeln!(f, "  {group}: {percent:.1}%")?;
            }
            Ok(())
        }
        MetricDetail::Coverage {
            coverage,
            categories,
        } => {
            write_categories(f, categories)?;
            writeln!(f, "Coverage: {coverage:.1}%")
        }
        MetricDetail::Age {
            mean,
            median,
            min,
            max,
            target_mean,
            target_min,
            target_max,
        } => {
            writeln!(f, "Mean age: {mean:.1} (target: {target_mean:.1})")?;
            writeln!(f, "Median age: {median}")?;
            writeln!(f, "Age range: {min}-{max} (target: {target_min}-{target_max})")
        }
    }
}
