//! Command-line arguments for the `tac` harness.

use clap::Parser;

use crate::config::{Config, DEFAULT_LOG_FILTER, LogFormat};

/// Runs one request through the reversing guest on the local machine.
#[derive(Parser, Debug)]
#[command(name = "tac", version)]
pub(crate) struct Cli {
    /// Verb to invoke, for example `http:POST`.
    #[arg(value_name = "VERB")]
    pub(crate) verb: String,
    /// Raw payload text; when absent the request envelope is read from stdin.
    #[arg(long, value_name = "TEXT")]
    pub(crate) payload: Option<String>,
    /// `tracing` filter directive for harness and host logger output.
    #[arg(long, value_name = "FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub(crate) log_filter: String,
    /// Log output format: `json` or `compact`.
    #[arg(long, value_name = "FORMAT", default_value_t = LogFormat::Json)]
    pub(crate) log_format: LogFormat,
}

impl Cli {
    /// Extracts the logging configuration.
    pub(crate) fn config(&self) -> Config {
        Config::new(self.log_filter.as_str(), self.log_format)
    }
}
