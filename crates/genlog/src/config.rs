//! Logger configuration.
//!
//! A [`LoggerConfig`] can be deserialized from JSON or read from the
//! environment and applied to a root logger with
//! [`Logger::configure`](crate::Logger::configure).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LogError, Result};

/// Default maximum verbosity; high enough that every level logs.
pub const DEFAULT_VERBOSITY: i32 = 1000;

/// Environment variable holding the maximum verbosity.
pub const VERBOSITY_ENV: &str = "GENLOG_VERBOSITY";

/// Environment variable enabling caller capture.
pub const CALLER_ENV: &str = "GENLOG_CALLER";

/// Settings applied to a root logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Maximum verbosity level that is logged.
    pub verbosity: i32,
    /// Whether to capture the caller's source location.
    pub caller: bool,
    /// Extra wrapper layers between the logging call and the real caller.
    pub call_depth: usize,
    /// Optional first name segment.
    pub name: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY,
            caller: false,
            call_depth: 0,
            name: None,
        }
    }
}

impl LoggerConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads `GENLOG_VERBOSITY` and `GENLOG_CALLER`; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(VERBOSITY_ENV) {
            config.verbosity = parse_verbosity(&raw)?;
        }
        if let Some(raw) = lookup(CALLER_ENV) {
            config.caller = parse_flag(CALLER_ENV, &raw)?;
        }
        debug!(verbosity = config.verbosity, caller = config.caller, "loaded logger config");
        Ok(config)
    }
}

/// Parses a verbosity level such as `"2"` or `"-1"`.
pub fn parse_verbosity(raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| LogError::InvalidVerbosity(raw.to_string()))
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(LogError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}
