//! CLI argument definitions for the batch validator.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Output format of a validation report.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for validating an exported batch.
#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Path to a JSON or JSONL batch written by `batch`
    pub file: PathBuf,

    /// Reference data YAML providing the target distributions (defaults to the bundled Swiss dataset)
    #[arg(long, env = "CAREER_SYNTH_REFERENCE")]
    pub reference: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}
