//! fabric-grade: fabric roll quality grading tool
//!
//! Grades inspected fabric rolls (A1 / A2 / B) from their recorded defects.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use fabric_grading::{
    cli,
    config::{AppConfig, BehaviorConfig, CatalogConfig, OutputConfig},
    quality::{Grade, LengthPolicy, ThresholdPreset},
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with grading info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSample Formats:",
        "\n  JSON (.json), YAML (anything else); one sample or a list per file",
        "\n\nOutput Formats:",
        "\n  summary, json, markdown, csv",
        "\n\nThreshold Presets:",
        "\n  standard, premium, industrial"
    )
}

#[derive(Parser)]
#[command(name = "fabric-grade")]
#[command(version, long_version = build_long_version())]
#[command(about = "Fabric roll quality grading tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  All samples graded at or above --min-grade
    1  A sample graded below --min-grade
    2  A sample failed validation
    3  Error occurred

EXAMPLES:
    # Grade one roll
    fabric-grade grade roll-1001.yaml

    # CI gate: fail unless the roll is at least A2
    fabric-grade grade roll-1001.yaml --min-grade A2 -o json

    # Grade a day's production as a table
    fabric-grade batch rolls/*.yaml

    # Export the built-in defect catalog as a starting point
    fabric-grade catalog --format yaml > defect-catalog.yaml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Options shared by the grading commands
#[derive(Args)]
struct GradingArgs {
    /// Output format [default: summary]
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Threshold preset (standard, premium, industrial)
    #[arg(long, value_parser = parse_preset)]
    preset: Option<ThresholdPreset>,

    /// Defect catalog file (YAML or JSON); built-in catalog if not specified
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Exit with code 1 if a sample grades below this (A1, A2, B)
    #[arg(long)]
    min_grade: Option<Grade>,

    /// Grade rolls with a non-positive length against a length of 1 instead of rejecting them
    #[arg(long)]
    legacy_length_fallback: bool,

    /// Inspection timestamp to record on reports (RFC 3339)
    #[arg(long, conflicts_with = "now")]
    inspected_at: Option<DateTime<Utc>>,

    /// Record the current time as the inspection timestamp
    #[arg(long)]
    now: bool,
}

impl GradingArgs {
    /// CLI values as a config layer over the file config
    fn to_overrides(&self, global: &Cli) -> AppConfig {
        AppConfig {
            preset: self.preset.unwrap_or_default(),
            thresholds: None,
            length_policy: self
                .legacy_length_fallback
                .then_some(LengthPolicy::LegacyFallback),
            catalog: CatalogConfig {
                path: self.catalog.clone(),
            },
            output: OutputConfig {
                format: self.output.unwrap_or_default(),
                file: self.output_file.clone(),
                no_color: global.no_color,
            },
            behavior: BehaviorConfig {
                min_grade: self.min_grade,
                quiet: global.quiet,
            },
        }
    }

    fn inspected_at(&self) -> Option<DateTime<Utc>> {
        if self.now {
            Some(Utc::now())
        } else {
            self.inspected_at
        }
    }
}

/// Arguments for the `grade` subcommand
#[derive(Args)]
struct GradeArgs {
    /// Path to the sample file
    sample: PathBuf,

    #[command(flatten)]
    grading: GradingArgs,
}

/// Arguments for the `batch` subcommand
#[derive(Args)]
struct BatchArgs {
    /// Sample files, each holding one sample or a list
    #[arg(required = true)]
    samples: Vec<PathBuf>,

    #[command(flatten)]
    grading: GradingArgs,
}

/// Arguments for the `catalog` subcommand
#[derive(Args)]
struct CatalogArgs {
    /// Listing format
    #[arg(short, long, value_enum, default_value = "table")]
    format: cli::CatalogListFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Defect catalog file to list instead of the configured one
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single inspected sample
    Grade(GradeArgs),

    /// Grade many samples in parallel
    Batch(BatchArgs),

    /// List the defect catalog
    Catalog(CatalogArgs),

    /// Show, document, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an example .fabric-grade.yaml in the current directory
    Init,
}

fn parse_preset(name: &str) -> Result<ThresholdPreset, String> {
    ThresholdPreset::from_name(name).ok_or_else(|| {
        let valid: Vec<_> = ThresholdPreset::all().iter().map(ThresholdPreset::name).collect();
        format!("Unknown preset '{name}'. Valid options: {}", valid.join(", "))
    })
}

fn exit_with(code: i32) -> Result<()> {
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match &cli.command {
        Commands::Grade(args) => {
            let (app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &args.grading.to_overrides(&cli));
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            let code = cli::run_grade(cli::GradeConfig {
                sample_path: args.sample.clone(),
                app,
                inspected_at: args.grading.inspected_at(),
            })?;
            exit_with(code)
        }

        Commands::Batch(args) => {
            let (app, _) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &args.grading.to_overrides(&cli));
            let code = cli::run_batch(cli::BatchConfig {
                sample_paths: args.samples.clone(),
                app,
                inspected_at: args.grading.inspected_at(),
            })?;
            exit_with(code)
        }

        Commands::Catalog(args) => {
            let overrides = AppConfig {
                catalog: CatalogConfig {
                    path: args.catalog.clone(),
                },
                behavior: BehaviorConfig {
                    quiet: cli.quiet,
                    ..BehaviorConfig::default()
                },
                ..AppConfig::default()
            };
            let (app, _) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            let code = cli::run_catalog(&app, args.format, args.output_file.clone())?;
            exit_with(code)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    fabric_grading::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema = fabric_grading::config::generate_json_schema();
                match output {
                    Some(path) => {
                        std::fs::write(path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".fabric-grade.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = fabric_grading::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "fabric-grade", &mut io::stdout());
            Ok(())
        }
    }
}
