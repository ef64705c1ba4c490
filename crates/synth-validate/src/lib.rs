//! Statistics validator for career-synth batches.
//!
//! This crate scores a generated batch against the target distributions in
//! [`synth_core::ValidationTargets`]: gender split, region split,
//! vocational-track share, sector coverage and age range. Each metric gets a
//! PASS/FAIL verdict against its threshold, and the batch passes when at
//! least 80% of the metrics pass.
//!
//! # Example
//!
//! ```ignore
//! use synth_validate::StatisticsValidator;
//!
//! let validator = StatisticsValidator::new(reference.targets.clone());
//! match validator.validate(&records) {
//!     Ok(report) => println!("{}", report.render()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod args;
pub mod error;
pub mod report;
pub mod statistics;
pub mod validator;

pub use args::{ReportFormat, ValidateArgs};
pub use error::ValidationError;
pub use report::{CategoryShare, Metric, MetricDetail, MetricResult, ValidationReport};
pub use statistics::{AgeSummary, BatchStatistics, EducationBreakdown};
pub use validator::{StatisticsValidator, Thresholds};
