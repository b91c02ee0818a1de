//! Trade record types handed to downstream consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy trade
    Buy,
    /// Sell trade
    Sell,
}

impl Side {
    /// Wire name of the side
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic stock trade.
///
/// Serialises with the field names `symbol`, `side`, `price`, `quantity`
/// and `sequenceId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Ticker symbol from the reference table
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Trade price, rounded to two decimal places
    pub price: f64,
    /// Number of shares, in `1..=10000`
    pub quantity: u64,
    /// Per-generator sequence number, starting at 1
    pub sequence_id: u64,
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {}: {} {} shares of {} for ${:.2}",
            self.sequence_id, self.side, self.quantity, self.symbol, self.price
        )
    }
}
