//! tradegen - Command Line Driver for the Synthetic Trade Generator
//!
//! # Commands
//!
//! - `tradegen generate` - Stream synthetic trades as JSON lines or CSV
//! - `tradegen symbols` - List the reference table trades are drawn from
//! - `tradegen check` - Validate configuration
//!
//! Configuration is read from `tradegen.toml` (or `--config`), then
//! `TRADEGEN_*` environment variables, then command-line flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trade_generator::config::{is_log_level, GeneratorConfig};
use trade_generator::export::OutputFormat;

mod commands;
mod error;

pub use error::{CliError, Result};

/// Synthetic stock trade generator
#[derive(Parser)]
#[command(name = "tradegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "tradegen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream synthetic trades
    Generate {
        /// Number of trades to emit
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pause between trades in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// List reference symbols and base prices
    Symbols {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration
    Check,
}

/// Default filter directive. An unknown configured level would otherwise be
/// read as a target name and hide every event.
fn default_directive(log_level: &str, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else if is_log_level(log_level) {
        log_level
    } else {
        "info"
    }
}

fn init_tracing(log_level: &str, verbose: bool) {
    let level = default_directive(log_level, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Apply `generate` flags on top of file and environment settings
fn apply_overrides(
    config: &mut GeneratorConfig,
    count: Option<usize>,
    seed: Option<u64>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    interval_ms: Option<u64>,
) {
    if let Some(count) = count {
        config.count = count;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(format) = format {
        config.format = format;
    }
    if output.is_some() {
        config.output = output;
    }
    if let Some(interval_ms) = interval_ms {
        config.interval_ms = interval_ms;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = GeneratorConfig::load_optional(&cli.config).map(GeneratorConfig::with_env_override);
    let log_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Check => commands::check::run(&cli.config, loaded),
        Commands::Symbols { format } => {
            let config = loaded?;
            config.validate()?;
            commands::symbols::run(&config.reference_table()?, &format)
        }
        Commands::Generate {
            count,
            seed,
            format,
            output,
            interval_ms,
        } => {
            let mut config = loaded?;
            apply_overrides(&mut config, count, seed, format, output, interval_ms);
            config.validate()?;
            debug!(?config, "Effective configuration");
            commands::generate::run(&config)
        }
    }
}
