//! Trade encodings for downstream consumers.
//!
//! Two formats are supported:
//!
//! - **JSON lines**: one JSON object per trade, as a stream publisher would
//!   put on the wire.
//! - **CSV**: header `symbol,side,price,quantity,sequenceId`, prices printed
//!   with exactly two decimals.

use crate::error::{GeneratorError, Result};
use crate::types::TradeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// CSV header row
pub const CSV_HEADER: [&str; 5] = ["symbol", "side", "price", "quantity", "sequenceId"];

/// Output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl OutputFormat {
    /// Format name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown format: {}. Supported: json, csv", other)),
        }
    }
}

/// Encode one trade as a JSON object
pub fn trade_to_json(trade: &TradeRecord) -> Result<String> {
    Ok(serde_json::to_string(trade)?)
}

/// Encode trades as JSON lines
pub fn trades_to_json_lines(trades: &[TradeRecord]) -> Result<String> {
    encode(trades, OutputFormat::Json)
}

/// Encode trades as CSV with a header row
pub fn trades_to_csv(trades: &[TradeRecord]) -> Result<String> {
    encode(trades, OutputFormat::Csv)
}

fn encode(trades: &[TradeRecord], format: OutputFormat) -> Result<String> {
    let mut writer = TradeWriter::new(Vec::new(), format)?;
    for trade in trades {
        writer.write(trade)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

enum Sink<W: Write> {
    Json(W),
    Csv(csv::Writer<W>),
}

/// Streaming trade writer.
///
/// Writes the CSV header on construction, then one record per
/// [`write`](Self::write) call.
pub struct TradeWriter<W: Write> {
    sink: Sink<W>,
    written: u64,
}

impl<W: Write> TradeWriter<W> {
    /// Create a writer in the given format
    pub fn new(writer: W, format: OutputFormat) -> Result<Self> {
        let sink = match format {
            OutputFormat::Json => Sink::Json(writer),
            OutputFormat::Csv => {
                let mut csv = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(writer);
                csv.write_record(CSV_HEADER)?;
                Sink::Csv(csv)
            }
        };
        Ok(Self { sink, written: 0 })
    }

    /// Write one trade
    pub fn write(&mut self, trade: &TradeRecord) -> Result<()> {
        match &mut self.sink {
            Sink::Json(w) => {
                serde_json::to_writer(&mut *w, trade)?;
                w.write_all(b"\n")?;
            }
            Sink::Csv(w) => {
                w.write_record([
                    trade.symbol.clone(),
                    trade.side.to_string(),
                    format!("{:.2}", trade.price),
                    trade.quantity.to_string(),
                    trade.sequence_id.to_string(),
                ])?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Json(w) => w.flush()?,
            Sink::Csv(w) => w.flush()?,
        }
        Ok(())
    }

    /// Number of trades written
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        match self.sink {
            Sink::Json(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Sink::Csv(w) => w.into_inner().map_err(|e| GeneratorError::Io(e.into_error())),
        }
    }
}
