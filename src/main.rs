//! Command-line interface for career-synth
//!
//! # Usage Examples
//!
//! ## Single Profile
//! ```bash
//! # Print one profile as a text CV
//! career-synth single --seed 42
//!
//! # Write one profile as markdown
//! career-synth single --format markdown --output cv.md
//! ```
//!
//! ## Batches
//! ```bash
//! # 1000 profiles as CSV, validated after generation
//! career-synth batch --count 1000 --output cvs.csv
//!
//! # Reproduce a run exactly, skipping validation
//! career-synth batch --count 1000 --output cvs.json --seed 42 \
//!   --generated-at 2024-06-01T08:00:00Z --no-validate
//!
//! # Large batches need --yes
//! career-synth batch --count 50000 --output cvs.jsonl --parallel --yes
//! ```
//!
//! ## Validation
//! ```bash
//! career-synth validate cvs.json
//! career-synth validate cvs.json --format json
//! ```
//!
//! Reference data defaults to the bundled Swiss dataset; pass `--reference`
//! or set `CAREER_SYNTH_REFERENCE` to use another YAML file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use synth_core::ReferenceData;
use synth_export::{BatchArgs, CommonGenerateArgs, ExportFormat, SingleArgs, CONFIRM_THRESHOLD};
use synth_generator::{GeneratorOptions, RecordGenerator};
use synth_validate::{ReportFormat, StatisticsValidator, ValidateArgs, ValidationReport};

#[derive(Parser)]
#[command(name = "career-synth")]
#[command(about = "Generate synthetic Swiss career profiles and validate them against labor-market statistics")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single career profile
    Single {
        #[command(flatten)]
        args: SingleArgs,
    },

    /// Generate a batch of profiles and export it
    Batch {
        #[command(flatten)]
        args: BatchArgs,
    },

    /// Validate an exported batch against the reference targets
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Show the reference data in use
    Info {
        /// Reference data YAML (defaults to the bundled Swiss dataset)
        #[arg(long, env = "CAREER_SYNTH_REFERENCE")]
        reference: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Single { args } => run_single(args),
        Commands::Batch { args } => run_batch(args),
        Commands::Validate { args } => run_validate(args),
        Commands::Info { reference } => run_info(reference.as_deref()),
    }
}

fn load_reference(path: Option<&Path>) -> anyhow::Result<ReferenceData> {
    match path {
        Some(path) => ReferenceData::from_file(path)
            .with_context(|| format!("Failed to load reference data from {path:?}")),
        None => ReferenceData::swiss().context("Failed to load bundled reference data"),
    }
}

fn build_generator(common: &CommonGenerateArgs) -> anyhow::Result<RecordGenerator> {
    let data = load_reference(common.reference.as_deref())?;
    let seed = common.seed.unwrap_or_else(rand::random);
    let mut options = GeneratorOptions::new(seed);
    if let Some(year) = common.reference_year {
        options = options.with_reference_year(year);
    }
    if let Some(timestamp) = common.generated_at {
        options = options.with_generated_at(timestamp);
    }

    tracing::info!(
        "Using reference data '{}' (seed={}, reference_year={})",
        data.name,
        seed,
        options.reference_year
    );

    RecordGenerator::new(data, options).context("Invalid reference data")
}

fn run_single(args: SingleArgs) -> anyhow::Result<()> {
    let mut generator = build_generator(&args.common)?;
    let record = generator
        .next_record()
        .context("Failed to generate profile")?;
    let rendered =
        synth_export::render_record(&record, args.format).context("Failed to render profile")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write profile to {path:?}"))?;
            tracing::info!(
                "Wrote profile of {} to {:?}",
                record.profile.full_name(),
                path
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    if args.needs_confirmation() {
        anyhow::bail!(
            "Refusing to generate {} records (more than {CONFIRM_THRESHOLD}) without --yes",
            args.count
        );
    }

    let format = match args.format {
        Some(format) => format,
        None => ExportFormat::from_path(&args.output)
            .context("Cannot infer output format, pass --format")?,
    };
    let count = usize::try_from(args.count).context("Batch count does not fit in memory")?;

    let mut generator = build_generator(&args.common)?;
    let seed = generator.options().seed;

    let records = if args.parallel {
        generator.generate_batch_parallel(count)
    } else {
        generator.generate_batch_chunked(count, args.chunk_size, |done, total| {
            tracing::info!("Generated {}/{} profiles", done, total);
        })
    }
    .context("Failed to generate batch")?;

    let metrics = synth_export::export_records(format, &records, &args.output, Some(seed))
        .with_context(|| format!("Failed to export batch to {:?}", args.output))?;

    tracing::info!(
        "Exported {} profiles to {:?} as {}: {} bytes in {:?}",
        metrics.records_written,
        args.output,
        format.extension(),
        metrics.file_size_bytes,
        metrics.total_duration
    );

    if args.should_validate() {
        let validator = StatisticsValidator::new(generator.reference_data().targets.clone());
        let report = validator
            .validate(&records)
            .context("Failed to validate batch")?;
        println!("{}", report.render());
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let data = load_reference(args.reference.as_deref())?;
    let records = synth_export::load_records(&args.file)
        .with_context(|| format!("Failed to load batch from {:?}", args.file))?;

    tracing::info!("Validating {} profiles from {:?}", records.len(), args.file);

    let report = StatisticsValidator::new(data.targets)
        .validate(&records)
        .context("Failed to validate batch")?;
    print_report(&report, args.format)?;

    if report.overall_passed {
        tracing::info!("{}", report.summary());
        Ok(())
    } else {
        Err(anyhow::anyhow!("{}", report.summary()))
    }
}

fn print_report(report: &ValidationReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => println!("{}", report.render()),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        ),
    }
    Ok(())
}

fn run_info(reference: Option<&Path>) -> anyhow::Result<()> {
    let data = load_reference(reference)?;
    data.validate().context("Invalid reference data")?;

    println!("career-synth {}", env!("CARGO_PKG_VERSION"));
    println!("Reference data: {}", data.name);
    println!();

    println!("Regions:");
    for region in &data.regions {
        println!(
            "  {:<18} {:>5.1}%  {} ({} localities)",
            region.region.as_str(),
            region.share,
            region.language,
            region.localities.len()
        );
    }

    println!("Sectors:");
    for sector in &data.sectors {
        println!(
            "  {:<26} {:>5.1}%  {} roles, {} rungs",
            sector.key,
            sector.share,
            sector.roles.len(),
            sector.ladder.len()
        );
    }

    let (min_age, max_age) = data
        .age_brackets
        .iter()
        .fold((u32::MAX, 0), |(lo, hi), b| (lo.min(b.low), hi.max(b.high)));
    println!("Ages: {min_age}-{max_age} in {} brackets", data.age_brackets.len());

    let targets = &data.targets;
    println!();
    println!("Validation targets:");
    for (gender, percent) in &targets.gender {
        println!("  {gender}: {percent:.1}%");
    }
    for (region, percent) in &targets.regions {
        println!("  {region}: {percent:.1}%");
    }
    println!("  vocational track: {:.1}%", targets.vocational_percent);
    println!(
        "  age: mean {:.1}, range {}-{}",
        targets.age.mean, targets.age.min, targets.age.max
    );
    Ok(())
}
