//! CLI argument definitions for generating and exporting records.

use crate::exporter::ExportFormat;
use crate::formatter::DisplayFormat;
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;

/// Largest batch generated without `--yes`.
pub const CONFIRM_THRESHOLD: u64 = 10_000;

/// Arguments shared by every generating command.
#[derive(Args, Clone, Debug)]
pub struct CommonGenerateArgs {
    /// Random seed for deterministic generation (same seed = same records)
    #[arg(long, env = "CAREER_SYNTH_SEED")]
    pub seed: Option<u64>,

    /// Reference data YAML (defaults to the bundled Swiss dataset)
    #[arg(long, env = "CAREER_SYNTH_REFERENCE")]
    pub reference: Option<PathBuf>,

    /// Year ages and birth years are computed against (defaults to the current year)
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// RFC 3339 timestamp stamped on every record (defaults to the start of the run)
    #[arg(long, env = "CAREER_SYNTH_GENERATED_AT")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Arguments for generating a single record.
#[derive(Args, Clone, Debug)]
pub struct SingleArgs {
    /// Output file (prints to stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = DisplayFormat::Text)]
    pub format: DisplayFormat,

    #[command(flatten)]
    pub common: CommonGenerateArgs,
}

/// Arguments for generating and exporting a batch.
#[derive(Args, Clone, Debug)]
pub struct BatchArgs {
    /// Number of records to generate
    #[arg(long, short = 'c', default_value = "100")]
    pub count: u64,

    /// Output file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Output format (inferred from the output extension when omitted)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<ExportFormat>,

    /// Records generated per chunk between progress reports
    #[arg(long, default_value = "1000")]
    pub chunk_size: usize,

    /// Generate on all cores; output is identical to sequential generation
    #[arg(long)]
    pub parallel: bool,

    /// Skip validating the batch against the reference targets
    #[arg(long)]
    pub no_validate: bool,

    /// Confirm batches larger than 10000 records
    #[arg(long, short = 'y')]
    pub yes: bool,

    #[command(flatten)]
    pub common: CommonGenerateArgs,
}

impl BatchArgs {
    /// Whether the batch is validated after generation.
    pub fn should_validate(&self) -> bool {
        !self.no_validate
    }

    /// Whether the requested count needs `--yes`.
    pub fn needs_confirmation(&self) -> bool {
        self.count > CONFIRM_THRESHOLD && !self.yes
    }
}
