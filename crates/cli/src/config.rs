// crates/cli/src/config.rs
//! Environment-driven defaults for the CLI.
//!
//! Command-line flags take precedence over anything read here.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

/// Log filter directives (same syntax as `RUST_LOG`).
pub const LOG_ENV: &str = "CONVO_SCORE_LOG";
/// Default output format: `text` or `json`.
pub const FORMAT_ENV: &str = "CONVO_SCORE_FORMAT";

pub const DEFAULT_LOG_FILTER: &str = "warn,convo_score=info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid CONVO_SCORE_FORMAT value {value:?}: expected \"text\" or \"json\"")]
    InvalidFormat { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_filter: String,
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset and blank
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_filter = non_blank(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let format = non_blank(FORMAT_ENV)
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self { log_filter, format })
    }
}
