//! Structured logging for the harness.
//!
//! Everything the harness and the guest log goes to stderr; stdout carries
//! only the response envelope, so `tac` output can be piped straight into
//! another tool. Guest log lines arrive under the
//! [`GUEST_LOG_TARGET`](crate::host::GUEST_LOG_TARGET) target and can be
//! filtered separately, for example with `--log-filter tac::guest=trace`.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{Config, LogFormat};

/// Format of the subscriber installed by the first successful call.
static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Proof that harness logging is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Returns the format in effect for this process.
    ///
    /// This is the format of the first successful initialisation, which may
    /// differ from the one most recently requested.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `--log-filter` was not a valid `tracing` directive.
    #[error("invalid log filter '{directive}': {message}")]
    Filter {
        /// Directive as supplied.
        directive: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the stderr subscriber for this run.
///
/// Only the first successful call installs anything; later calls return the
/// handle of that installation.
///
/// # Examples
///
/// ```rust
/// use tac_cli::{Config, LogFormat, telemetry};
///
/// # fn main() -> Result<(), tac_cli::telemetry::TelemetryError> {
/// let first = telemetry::initialise(&Config::new("tac::guest=trace", LogFormat::Compact))?;
/// let second = telemetry::initialise(&Config::default())?;
///
/// // The compact subscriber stays in place.
/// assert_eq!(second.format(), first.format());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Subscriber`] when a subscriber was installed by
/// someone else.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| install_subscriber(config).map(|()| config.log_format()))
        .map(|format| TelemetryHandle { format: *format })
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter {
            directive: config.log_filter().to_owned(),
            message: error.to_string(),
        })?;

    let stderr_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(stderr_builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(stderr_builder.compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
