//! Generate command implementation
//!
//! Streams trades to stdout or a file. With a non-zero interval the output is
//! flushed after every trade and the loop sleeps between trades, pacing the
//! stream the way a live feed would arrive.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use trade_generator::config::GeneratorConfig;
use trade_generator::export::TradeWriter;

use crate::Result;

/// Run the generate command
pub fn run(config: &GeneratorConfig) -> Result<()> {
    info!("Starting trade generation...");
    info!("  Count: {}", config.count);
    info!("  Format: {}", config.format);
    info!("  Interval: {} ms", config.interval_ms);

    match &config.output {
        Some(path) => {
            info!("  Output: {}", path.display());
            let file = File::create(path)?;
            emit(config, BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            emit(config, BufWriter::new(stdout.lock()))?;
        }
    }

    Ok(())
}

/// Generate `config.count` trades into `writer`, returning how many were
/// written.
pub fn emit<W: Write>(config: &GeneratorConfig, writer: W) -> Result<u64> {
    let mut generator = config.build_generator()?;
    info!(seed = generator.seed(), "Generator ready");

    let interval = Duration::from_millis(config.interval_ms);
    let mut writer = TradeWriter::new(writer, config.format)?;
    let started = Instant::now();

    for i in 0..config.count {
        let trade = generator.generate();
        writer.write(&trade)?;

        if !interval.is_zero() {
            writer.flush()?;
            if i + 1 < config.count {
                thread::sleep(interval);
            }
        }
    }
    writer.flush()?;

    let written = writer.written();
    info!(
        trades = written,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Trade generation complete"
    );
    Ok(written)
}
