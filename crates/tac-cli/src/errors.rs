//! Errors raised by the harness runtime.

use tac_guest::DispatchError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that prevent the harness from producing a response envelope.
#[derive(Debug, Error)]
pub enum CliError {
    /// Telemetry could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// The request could not be read from stdin.
    #[error("failed to read request from stdin: {0}")]
    ReadRequest(std::io::Error),

    /// The request envelope built from `--payload` could not be serialised.
    #[error("failed to serialise request envelope: {0}")]
    SerializeRequest(serde_json::Error),

    /// The guest refused the verb.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Writing the response envelope failed.
    #[error("failed to write response: {0}")]
    WriteResponse(std::io::Error),
}
