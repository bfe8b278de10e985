//! tidewatch: run a hotspot cycle from the command line.
//!
//! Reads field reports and classified social signals as JSON arrays, runs one
//! engine cycle and prints the resulting hotspots as JSON on stdout. Logs go
//! to stderr.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tidewatch_core::types::{Report, RiskLevel, SocialSignal};
use tidewatch_core::validation::validate_cycle_inputs;
use tidewatch_core::ConfigUpdate;
use tidewatch_engine::HotspotEngine;
use tracing::info;

/// Coastal hazard hotspot engine.
#[derive(Parser, Debug)]
#[command(name = "tidewatch", version, about = "Coastal hazard hotspot engine")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one cycle over the given inputs and print the hotspots.
    Generate(GenerateArgs),
    /// Check inputs and configuration without running a cycle.
    Validate(ValidateArgs),
    /// Print the effective engine configuration.
    ShowConfig(EngineArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Config file (default: <config_dir>/tidewatch/engine.toml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reports needed before a cluster becomes a hotspot.
    #[arg(long)]
    min_reports: Option<usize>,

    /// Clustering distance and hotspot radius cap, in km.
    #[arg(long)]
    max_radius_km: Option<f64>,

    /// Intensity lost per elapsed hour.
    #[arg(long)]
    decay_factor: Option<f64>,

    /// Intensity added per social mention, in [0, 1].
    #[arg(long)]
    social_media_weight: Option<f64>,

    /// Multiplier for verified reports.
    #[arg(long)]
    verification_bonus: Option<f64>,
}

impl EngineArgs {
    fn overrides(&self) -> ConfigUpdate {
        ConfigUpdate {
            min_reports_for_hotspot: self.min_reports,
            max_radius_km: self.max_radius_km,
            decay_factor: self.decay_factor,
            social_media_weight: self.social_media_weight,
            verification_bonus: self.verification_bonus,
        }
    }

    fn engine_config(&self) -> Result<tidewatch_core::EngineConfig> {
        let layered = settings::load_update(self.config.as_deref(), None)?;
        settings::resolve(&layered, &self.overrides())
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON array of field reports.
    #[arg(short, long)]
    reports: Option<PathBuf>,

    /// JSON array of classified social signals.
    #[arg(short, long)]
    signals: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    inputs: InputArgs,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Only print critical hotspots.
    #[arg(long, conflicts_with = "risk_level")]
    critical_only: bool,

    /// Only print hotspots at this risk level.
    #[arg(long)]
    risk_level: Option<RiskLevel>,

    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Validate(args) => validate(args),
        Commands::ShowConfig(args) => show_config(args),
    }
}

fn read_json_array<T: DeserializeOwned>(path: Option<&Path>) -> Result<Vec<T>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_inputs(args: &InputArgs) -> Result<(Vec<Report>, Vec<SocialSignal>)> {
    let reports: Vec<Report> = read_json_array(args.reports.as_deref())?;
    let signals: Vec<SocialSignal> = read_json_array(args.signals.as_deref())?;
    Ok((reports, signals))
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = args.engine.engine_config()?;
    let (reports, signals) = load_inputs(&args.inputs)?;
    validate_cycle_inputs(&reports, &signals, &config).context("Invalid cycle input")?;

    let now = args.at.unwrap_or_else(Utc::now);
    let engine = HotspotEngine::new(config);
    let (hotspots, summary) = engine.run_cycle_at(&reports, &signals, now);

    let selected = if args.critical_only {
        engine.critical_hotspots()
    } else if let Some(level) = args.risk_level {
        engine.hotspots_by_risk_level(level)
    } else {
        hotspots
    };

    info!(
        active = summary.active,
        printed = selected.len(),
        early_warnings = summary.early_warnings,
        "cycle finished"
    );
    println!("{}", serde_json::to_string_pretty(&selected)?);
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let config = args.engine.engine_config()?;
    let (reports, signals) = load_inputs(&args.inputs)?;
    validate_cycle_inputs(&reports, &signals, &config).context("Invalid cycle input")?;
    println!(
        "ok: {} reports, {} signals",
        reports.len(),
        signals.len()
    );
    Ok(())
}

fn show_config(args: EngineArgs) -> Result<()> {
    let config = args.engine_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. Both write to stderr.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
