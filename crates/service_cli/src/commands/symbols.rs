//! Symbols command implementation
//!
//! Lists the reference table trades are drawn from.

use tracing::info;
use trade_generator::generator::MAX_DEVIATION;
use trade_generator::reference::ReferenceTable;

use crate::{CliError, Result};

/// Run the symbols command
pub fn run(table: &ReferenceTable, format: &str) -> Result<()> {
    info!(
        entries = table.len(),
        standard = table.is_standard(),
        "Listing reference table"
    );
    println!("{}", render(table, format)?);
    Ok(())
}

/// Render the table as text or JSON
pub fn render(table: &ReferenceTable, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(table.entries())?),
        "table" => {
            let mut out = String::new();
            out.push_str("┌────────────┬──────────────┬──────────────┬──────────────┐\n");
            out.push_str("│ Symbol     │ Base         │ Low          │ High         │\n");
            out.push_str("├────────────┼──────────────┼──────────────┼──────────────┤\n");
            for entry in table {
                let (low, high) = entry.price_bounds(MAX_DEVIATION);
                out.push_str(&format!(
                    "│ {:<10} │ {:>12.2} │ {:>12.2} │ {:>12.2} │\n",
                    entry.symbol(),
                    entry.base_price(),
                    low,
                    high
                ));
            }
            out.push_str("└────────────┴──────────────┴──────────────┴──────────────┘");
            Ok(out)
        }
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: table, json",
            other
        ))),
    }
}
