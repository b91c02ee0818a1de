//! Error types for the trade generator.
//!
//! Generating a trade never fails. Errors only arise when building a custom
//! reference table, loading configuration, or encoding trades for output.

use thiserror::Error;

/// Trade generator error type
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Reference table has no entries
    #[error("Reference table must contain at least one entry")]
    EmptyReference,

    /// Reference entry has a blank symbol
    #[error("Reference entry at index {0} has an empty symbol")]
    EmptySymbol(usize),

    /// Reference entry symbol appears more than once
    #[error("Duplicate reference symbol: {0}")]
    DuplicateSymbol(String),

    /// Reference entry base price is zero, negative, or not finite
    #[error("Invalid base price {price} for symbol {symbol}")]
    InvalidBasePrice {
        /// Offending symbol
        symbol: String,
        /// Offending base price
        price: f64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Create an invalid base price error
    pub fn invalid_base_price(symbol: impl Into<String>, price: f64) -> Self {
        Self::InvalidBasePrice {
            symbol: symbol.into(),
            price,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeneratorError>;
