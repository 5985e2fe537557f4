//! Configuration Module
//!
//! This module defines the configuration structures for the validator.
//! Configuration is loaded from TOML files and parsed using serde.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure
///
/// Every section is optional and falls back to its defaults.
///
/// # Example TOML
/// ```toml
/// [logging]
/// level = "info"
/// format = "pretty"
///
/// [[genesis]]
/// tx_id = "genesis"
/// output_index = 0
/// amount = 100.0
/// recipient = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub genesis: Vec<GenesisUtxo>,
}

/// Logging configuration
///
/// # Fields
/// - `level`: Default `EnvFilter` directive, used when `RUST_LOG` is unset
/// - `format`: Output format, `"pretty"` or `"json"`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for local development
    #[default]
    Pretty,
    /// JSON lines for log aggregation
    Json,
}

/// Output seeded into the UTXO pool at startup
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisUtxo {
    pub tx_id: String,
    pub output_index: u16,
    pub amount: f64,
    pub recipient: String,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
