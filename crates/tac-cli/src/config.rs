//! Harness configuration resolved from the command line.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Filter applied when none is supplied.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Logging settings for one harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    log_filter: String,
    log_format: LogFormat,
}

impl Config {
    /// Creates a configuration.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
        }
    }

    /// Returns the `tracing` filter directive.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILTER, LogFormat::default())
    }
}
