//! Startup configuration.
//!
//! Values are resolved once, in precedence order: explicit override (CLI
//! flag), environment variable, TOML file, built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use soc_triage_ui::DEFAULT_REVEAL_DELAY_MS;
use thiserror::Error;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// Transport timeout used when nothing else is configured.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Environment variable holding the analysis service base URL.
pub const API_URL_ENV: &str = "SOC_TRIAGE_API_URL";
/// Environment variable holding the reveal delay in milliseconds.
pub const REVEAL_DELAY_ENV: &str = "SOC_TRIAGE_REVEAL_DELAY_MS";
/// Environment variable holding the transport timeout in milliseconds.
pub const REQUEST_TIMEOUT_ENV: &str = "SOC_TRIAGE_TIMEOUT_MS";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    /// Analysis service base URL (without `/analyze`).
    pub api_url: String,
    /// Pause between result arrival and reveal.
    pub reveal_delay_ms: u64,
    /// Transport-level timeout; `0` disables it.
    pub request_timeout_ms: u64,
}

impl TriageConfig {
    /// Returns the transport timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Optional values read from a TOML file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Base URL.
    pub api_url: Option<String>,
    /// Reveal delay in milliseconds.
    pub reveal_delay_ms: Option<u64>,
    /// Transport timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

/// Values supplied explicitly, typically from CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Base URL.
    pub api_url: Option<String>,
    /// Reveal delay in milliseconds.
    pub reveal_delay_ms: Option<u64>,
    /// Transport timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

/// Reads and parses a TOML config file.
///
/// # Errors
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_config(&raw)
}

/// Parses TOML config text.
///
/// # Errors
/// Returns [`ConfigError::Parse`] for invalid TOML or unknown keys.
pub fn parse_file_config(raw: &str) -> Result<FileConfig, ConfigError> {
    toml::from_str(raw).map_err(|error| ConfigError::Parse(error.to_string()))
}

/// Resolves the final configuration.
///
/// `env` looks up environment variables; pass [`process_env`] in production
/// and a closure over fixed values in tests. Blank environment values count as
/// unset.
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] for non-numeric millisecond values
/// and [`ConfigError::EmptyApiUrl`] when the winning base URL is blank.
pub fn resolve_config<F>(
    overrides: &ConfigOverrides,
    file: Option<&FileConfig>,
    env: F,
) -> Result<TriageConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = TriageConfig::default();
    let file = file.cloned().unwrap_or_default();
    let env_value = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let api_url = overrides
        .api_url
        .clone()
        .or_else(|| env_value(API_URL_ENV))
        .or(file.api_url)
        .unwrap_or(defaults.api_url);
    if api_url.trim().is_empty() {
        return Err(ConfigError::EmptyApiUrl);
    }

    let reveal_delay_ms = match overrides.reveal_delay_ms {
        Some(value) => value,
        None => match env_value(REVEAL_DELAY_ENV) {
            Some(raw) => parse_millis(REVEAL_DELAY_ENV, &raw)?,
            None => file.reveal_delay_ms.unwrap_or(defaults.reveal_delay_ms),
        },
    };

    let request_timeout_ms = match overrides.request_timeout_ms {
        Some(value) => value,
        None => match env_value(REQUEST_TIMEOUT_ENV) {
            Some(raw) => parse_millis(REQUEST_TIMEOUT_ENV, &raw)?,
            None => file
                .request_timeout_ms
                .unwrap_or(defaults.request_timeout_ms),
        },
    };

    Ok(TriageConfig {
        api_url: api_url.trim().to_string(),
        reveal_delay_ms,
        request_timeout_ms,
    })
}

/// Looks up a variable in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_millis(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Config file is not valid TOML for [`FileConfig`].
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// A millisecond value is not a non-negative integer.
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber {
        /// Setting name.
        name: &'static str,
        /// Rejected raw value.
        value: String,
    },
    /// Resolved base URL is blank.
    #[error("analysis service base url is empty")]
    EmptyApiUrl,
}
