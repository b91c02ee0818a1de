//! CLI error types.

use thiserror::Error;
use trade_generator::config::ConfigError;
use trade_generator::GeneratorError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Generator or encoding failure
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
