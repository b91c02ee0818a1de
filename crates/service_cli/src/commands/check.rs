//! Check command implementation
//!
//! Loads configuration the same way `generate` does and reports whether it
//! is usable.

use std::path::Path;
use tracing::{error, info};
use trade_generator::config::{ConfigError, GeneratorConfig};

use crate::Result;

/// Run the check command
pub fn run(path: &Path, loaded: std::result::Result<GeneratorConfig, ConfigError>) -> Result<()> {
    info!("Checking configuration at {}", path.display());
    if !path.exists() {
        info!("  File not found, defaults apply");
    }

    let config = loaded?;
    if let Err(e) = config.validate() {
        if let ConfigError::Validation(problems) = &e {
            for problem in problems {
                error!("  {}", problem);
            }
        }
        return Err(e.into());
    }

    let table = config.reference_table()?;
    println!("{}", summary(&config, table.len()));
    info!("Configuration OK");
    Ok(())
}

fn summary(config: &GeneratorConfig, symbols: usize) -> String {
    let seed = config
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "entropy".to_string());
    let output = config
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    format!(
        "seed={} count={} format={} interval_ms={} output={} symbols={}",
        seed, config.count, config.format, config.interval_ms, output, symbols
    )
}
