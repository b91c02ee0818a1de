//! # Trade Generator
//!
//! Synthetic stock trade records for streaming ingestion demos.
//!
//! A [`TradeGenerator`] picks a symbol from a fixed reference table, prices it
//! within ±20% of the symbol's base price, chooses a side (40% sells) and a
//! quantity between 1 and 10 000, and stamps the trade with a gap-free
//! sequence id.
//!
//! ## Modules
//!
//! - [`reference`]: The (symbol, base price) table trades are anchored on
//! - [`rng`]: Random source trait and the seedable production source
//! - [`generator`]: Trade generation and the [`TradeSource`] trait
//! - [`shared`]: Mutex-guarded generator for concurrent callers
//! - [`export`]: JSON lines and CSV encodings
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Usage Example
//!
//! ```rust
//! use trade_generator::prelude::*;
//!
//! let mut generator = TradeGenerator::with_seed(12345);
//! let trades = generator.generate_trades(3);
//!
//! let ids: Vec<u64> = trades.iter().map(|t| t.sequence_id).collect();
//! assert_eq!(ids, vec![1, 2, 3]);
//!
//! let csv = trades_to_csv(&trades).unwrap();
//! assert!(csv.starts_with("symbol,side,price,quantity,sequenceId"));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod reference;
pub mod rng;
pub mod shared;
pub mod types;

pub use error::{GeneratorError, Result};
pub use generator::{TradeGenerator, TradeSource};
pub use shared::SharedTradeGenerator;
pub use types::{Side, TradeRecord};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, GeneratorConfig};
    pub use crate::error::GeneratorError;
    pub use crate::export::{trades_to_csv, trades_to_json_lines, OutputFormat, TradeWriter};
    pub use crate::generator::{TradeGenerator, TradeSource};
    pub use crate::reference::{ReferenceEntry, ReferenceTable};
    pub use crate::rng::{RandomSource, TradeRng};
    pub use crate::shared::SharedTradeGenerator;
    pub use crate::types::{Side, TradeRecord};
}
