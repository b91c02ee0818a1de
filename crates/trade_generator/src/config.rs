//! Generator configuration management.
//!
//! Handles loading of generator configuration from TOML files with
//! environment variable override support.
//!
//! ```toml
//! seed = 42
//! count = 1000
//! format = "csv"
//! interval_ms = 100
//! log_level = "debug"
//! output = "trades.csv"
//!
//! [[reference]]
//! symbol = "TSLA"
//! base_price = 250.0
//! ```

use crate::error::GeneratorError;
use crate::export::OutputFormat;
use crate::generator::TradeGenerator;
use crate::reference::{validate_entries, ReferenceEntry, ReferenceTable};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Largest batch a single run may request
pub const MAX_COUNT: usize = 10_000_000;

/// Longest pause allowed between emitted trades
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Accepted `log_level` values, compared case-insensitively
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Fixed seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of trades to emit
    #[serde(default = "default_count")]
    pub count: usize,

    /// Output encoding
    #[serde(default)]
    pub format: OutputFormat,

    /// Pause between trades in milliseconds
    #[serde(default)]
    pub interval_ms: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output file; stdout when absent
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Custom reference table; the standard table when absent
    #[serde(default)]
    pub reference: Option<Vec<ReferenceEntry>>,
}

fn default_count() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            count: default_count(),
            format: OutputFormat::default(),
            interval_ms: 0,
            log_level: default_log_level(),
            output: None,
            reference: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. A file that cannot be read or fails to parse is
    /// an error.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "Loading configuration");
                Self::from_toml(&content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Load configuration from `path` or return the default config
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(seed) = std::env::var("TRADEGEN_SEED") {
            match seed.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!(value = %seed, "Ignoring invalid TRADEGEN_SEED"),
            }
        }

        if let Ok(count) = std::env::var("TRADEGEN_COUNT") {
            match count.parse() {
                Ok(count) => self.count = count,
                Err(_) => warn!(value = %count, "Ignoring invalid TRADEGEN_COUNT"),
            }
        }

        if let Ok(format) = std::env::var("TRADEGEN_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => warn!(error = %e, "Ignoring invalid TRADEGEN_FORMAT"),
            }
        }

        if let Ok(interval) = std::env::var("TRADEGEN_INTERVAL_MS") {
            match interval.parse() {
                Ok(interval) => self.interval_ms = interval,
                Err(_) => warn!(value = %interval, "Ignoring invalid TRADEGEN_INTERVAL_MS"),
            }
        }

        if let Ok(log_level) = std::env::var("TRADEGEN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(output) = std::env::var("TRADEGEN_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }

        self
    }

    /// Validate the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !is_log_level(&self.log_level) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, LOG_LEVELS
            ));
        }

        if self.count == 0 {
            errors.push("count must be greater than 0".to_string());
        }
        if self.count > MAX_COUNT {
            errors.push(format!(
                "count {} exceeds maximum allowed ({})",
                self.count, MAX_COUNT
            ));
        }

        if self.interval_ms > MAX_INTERVAL_MS {
            errors.push(format!(
                "interval_ms {} exceeds maximum allowed ({})",
                self.interval_ms, MAX_INTERVAL_MS
            ));
        }

        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                errors.push("output cannot be empty".to_string());
            }
        }

        if let Some(entries) = &self.reference {
            if let Err(e) = validate_entries(entries) {
                errors.push(format!("reference: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file (defaults when missing) with environment overrides and
    /// validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_optional(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Reference table described by this configuration
    pub fn reference_table(&self) -> Result<ReferenceTable, GeneratorError> {
        match &self.reference {
            Some(entries) => ReferenceTable::new(entries.clone()),
            None => Ok(ReferenceTable::standard()),
        }
    }

    /// Build a generator from this configuration
    pub fn build_generator(&self) -> Result<TradeGenerator, GeneratorError> {
        let generator = match self.seed {
            Some(seed) => TradeGenerator::with_seed(seed),
            None => TradeGenerator::new(),
        };
        Ok(generator.with_reference(self.reference_table()?))
    }
}

/// Whether `level` is one of [`LOG_LEVELS`]
pub fn is_log_level(level: &str) -> bool {
    LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level))
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.count, 100);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = GeneratorConfig::from_toml(
            r#"
            seed = 42
            count = 1000
            format = "csv"
            interval_ms = 250
            log_level = "debug"
            output = "trades.csv"

            [[reference]]
            symbol = "TSLA"
            base_price = 250.0

            [[reference]]
            symbol = "NFLX"
            base_price = 480.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.count, 1000);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.interval_ms, 250);
        assert_eq!(config.output, Some(PathBuf::from("trades.csv")));
        assert_eq!(config.reference.as_ref().map(Vec::len), Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = GeneratorConfig::from_toml("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_parse_unknown_key_rejected() {
        let result = GeneratorConfig::from_toml("cuont = 5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_bad_format_rejected() {
        let result = GeneratorConfig::from_toml("format = \"xml\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = 7\nseed = 3").unwrap();

        let config = GeneratorConfig::load_and_validate(file.path()).unwrap();
        assert_eq!(config.count, 7);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(GeneratorConfig::load(&path), Err(ConfigError::Io(_))));
        assert_eq!(
            GeneratorConfig::load_optional(&path).unwrap(),
            GeneratorConfig::default()
        );
        assert_eq!(GeneratorConfig::load_or_default(&path), GeneratorConfig::default());
    }

    #[test]
    fn test_load_optional_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = \"many\"").unwrap();
        assert!(matches!(
            GeneratorConfig::load_optional(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_optional_unreadable_path() {
        // Reading a directory fails with something other than NotFound
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GeneratorConfig::load_optional(dir.path()),
            Err(ConfigError::Io(_))
        ));
    }

    // The only test in this crate that touches TRADEGEN_* variables; keep the
    // env cases together so parallel tests cannot interleave them.
    #[test]
    fn test_env_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = 7\nseed = 3\nformat = \"json\"").unwrap();

        std::env::set_var("TRADEGEN_SEED", "77");
        std::env::set_var("TRADEGEN_COUNT", "12");
        std::env::set_var("TRADEGEN_FORMAT", "csv");
        std::env::set_var("TRADEGEN_INTERVAL_MS", "not-a-number");

        let from_default = GeneratorConfig::default().with_env_override();
        let from_file = GeneratorConfig::load_with_env_and_validate(file.path());

        std::env::remove_var("TRADEGEN_SEED");
        std::env::remove_var("TRADEGEN_COUNT");
        std::env::remove_var("TRADEGEN_FORMAT");
        std::env::remove_var("TRADEGEN_INTERVAL_MS");

        assert_eq!(from_default.seed, Some(77));
        assert_eq!(from_default.count, 12);
        assert_eq!(from_default.format, OutputFormat::Csv);
        // Invalid values leave the setting untouched
        assert_eq!(from_default.interval_ms, 0);

        // Environment values win over the file
        let from_file = from_file.unwrap();
        assert_eq!(from_file.count, 12);
        assert_eq!(from_file.seed, Some(77));
        assert_eq!(from_file.format, OutputFormat::Csv);

        // Without the environment the file values stand
        let plain = GeneratorConfig::load_with_env_and_validate(file.path()).unwrap();
        assert_eq!(plain.count, 7);
        assert_eq!(plain.seed, Some(3));
        assert_eq!(plain.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = GeneratorConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };

        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert!(errors.iter().any(|e| e.contains("log_level")));
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "Debug"] {
            let config = GeneratorConfig {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_is_log_level() {
        assert!(is_log_level("warn"));
        assert!(is_log_level("TRACE"));
        assert!(!is_log_level("chatty"));
        assert!(!is_log_level(""));
    }

    #[test]
    fn test_validate_count_bounds() {
        let zero = GeneratorConfig {
            count: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Validation(e)) if e[0].contains("count")));

        let huge = GeneratorConfig {
            count: MAX_COUNT + 1,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::Validation(e)) if e[0].contains("exceeds maximum")));
    }

    #[test]
    fn test_validate_bad_reference() {
        let config = GeneratorConfig {
            reference: Some(vec![ReferenceEntry::new("X", -1.0)]),
            ..Default::default()
        };
        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert!(errors.iter().any(|e| e.starts_with("reference")));
        } else {
            panic!("Expected validation error");
        }

        let empty = GeneratorConfig {
            reference: Some(Vec::new()),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_validate_multiple_errors() {
        let config = GeneratorConfig {
            log_level: "invalid".to_string(),
            count: 0,
            interval_ms: MAX_INTERVAL_MS + 1,
            output: Some(PathBuf::new()),
            ..Default::default()
        };

        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert_eq!(errors.len(), 4);
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = error.to_string();
        assert!(display.contains("Error 1; Error 2"));
    }

    #[test]
    fn test_build_generator_seeded() {
        let config = GeneratorConfig {
            seed: Some(5),
            ..Default::default()
        };
        let mut a = config.build_generator().unwrap();
        let mut b = TradeGenerator::with_seed(5);
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn test_build_generator_custom_reference() {
        let config = GeneratorConfig {
            seed: Some(1),
            reference: Some(vec![ReferenceEntry::new("ZZZ", 5.0)]),
            ..Default::default()
        };
        let mut generator = config.build_generator().unwrap();
        assert_eq!(generator.generate().symbol, "ZZZ");
    }

    #[test]
    fn test_build_generator_rejects_empty_reference() {
        let config = GeneratorConfig {
            reference: Some(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.build_generator(),
            Err(GeneratorError::EmptyReference)
        ));
    }
}
