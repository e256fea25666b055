//! Client configuration captured at build time.
//!
//! WASM bundles have no process environment, so the values are read with
//! `option_env!` when the crate is compiled and parsed into typed fields here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Errors produced while parsing client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `CAMPUS_LOG_LEVEL` is not one of `error`, `warn`, `info`, `debug`, `trace`.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every REST path. Empty means same origin.
    pub api_base_url: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned(), log_level: DEFAULT_LOG_LEVEL }
    }
}

impl ClientConfig {
    /// Build typed config from the compile-time environment.
    ///
    /// Optional:
    /// - `CAMPUS_API_BASE_URL`: API origin, same origin when absent
    /// - `CAMPUS_LOG_LEVEL`: `info` when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level name.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("CAMPUS_API_BASE_URL"), option_env!("CAMPUS_LOG_LEVEL"))
    }

    /// Parse raw optional values into a config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level name.
    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Result<Self, ConfigError> {
        let api_base_url = api_base_url
            .map_or(DEFAULT_API_BASE_URL, str::trim)
            .trim_end_matches('/')
            .to_owned();

        let log_level = match log_level.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => log::Level::from_str(raw).map_err(|_| ConfigError::InvalidLogLevel(raw.to_owned()))?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self { api_base_url, log_level })
    }
}
