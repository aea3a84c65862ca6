//! Host capability calls.
//!
//! Tarmac exposes its services to guests as named capabilities addressed by
//! namespace, capability, and operation. The guest reaches them through the
//! [`HostCall`] trait so handlers can run against a substitute host in tests
//! or in the native harness.
//!
//! A call is synchronous and is attempted exactly once. Its failure is
//! surfaced to the caller unchanged.

use std::fmt;

use thiserror::Error;

/// Namespace under which Tarmac registers its capabilities.
pub const TARMAC_NAMESPACE: &str = "tarmac";

/// Capability name of the host logger.
pub const LOGGER_CAPABILITY: &str = "logger";

/// Synchronous access to host capabilities.
///
/// # Example
///
/// ```
/// use tac_guest::host::{HostCall, HostCallError};
///
/// struct Silent;
///
/// impl HostCall for Silent {
///     fn call(
///         &self,
///         _namespace: &str,
///         _capability: &str,
///         _operation: &str,
///         _payload: &[u8],
///     ) -> Result<Vec<u8>, HostCallError> {
///         Ok(Vec::new())
///     }
/// }
///
/// assert!(Silent.call("tarmac", "logger", "trace", b"hi").is_ok());
/// ```
pub trait HostCall {
    /// Invokes `operation` on `capability` within `namespace`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostCallError`] when the host rejects the call or does not
    /// provide the capability.
    fn call(
        &self,
        namespace: &str,
        capability: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, HostCallError>;
}

impl<H: HostCall + ?Sized> HostCall for &H {
    fn call(
        &self,
        namespace: &str,
        capability: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, HostCallError> {
        (**self).call(namespace, capability, operation, payload)
    }
}

/// Errors returned by host capability calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostCallError {
    /// The host executed the call and reported a failure.
    #[error("{namespace}:{capability}:{operation} failed: {message}")]
    Rejected {
        /// Namespace addressed.
        namespace: String,
        /// Capability addressed.
        capability: String,
        /// Operation requested.
        operation: String,
        /// Host-provided failure description.
        message: String,
    },

    /// The host does not provide the requested capability.
    #[error("{namespace}:{capability}:{operation} is not provided by this host")]
    Unsupported {
        /// Namespace addressed.
        namespace: String,
        /// Capability addressed.
        capability: String,
        /// Operation requested.
        operation: String,
    },
}

impl HostCallError {
    /// Builds a [`HostCallError::Rejected`] for the given address.
    #[must_use]
    pub fn rejected(
        namespace: &str,
        capability: &str,
        operation: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            namespace: namespace.to_owned(),
            capability: capability.to_owned(),
            operation: operation.to_owned(),
            message: message.into(),
        }
    }

    /// Builds a [`HostCallError::Unsupported`] for the given address.
    #[must_use]
    pub fn unsupported(namespace: &str, capability: &str, operation: &str) -> Self {
        Self::Unsupported {
            namespace: namespace.to_owned(),
            capability: capability.to_owned(),
            operation: operation.to_owned(),
        }
    }
}

/// Severity levels understood by the Tarmac logger capability.
///
/// Each level doubles as the operation name of the logger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Unrecoverable failures.
    Error,
    /// Suspicious but tolerated conditions.
    Warn,
    /// Routine events.
    Info,
    /// Developer diagnostics.
    Debug,
    /// Fine-grained tracing.
    Trace,
}

impl LogLevel {
    /// Returns the logger operation name for this level.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Parses a logger operation name.
    #[must_use]
    pub fn from_operation(operation: &str) -> Option<Self> {
        match operation {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Adapter over [`HostCall`] for the Tarmac logger capability.
#[derive(Debug)]
pub struct HostLogger<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H: HostCall + ?Sized> HostLogger<'h, H> {
    /// Wraps `host`.
    #[must_use]
    pub const fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Sends `message` to the host logger at `level`.
    ///
    /// # Errors
    ///
    /// Returns the host's [`HostCallError`] unchanged.
    pub fn log(&self, level: LogLevel, message: &str) -> Result<(), HostCallError> {
        self.host
            .call(
                TARMAC_NAMESPACE,
                LOGGER_CAPABILITY,
                level.operation(),
                message.as_bytes(),
            )
            .map(drop)
    }

    /// Sends `message` to the host logger at error level.
    ///
    /// # Errors
    ///
    /// Returns the host's [`HostCallError`] unchanged.
    pub fn error(&self, message: &str) -> Result<(), HostCallError> {
        self.log(LogLevel::Error, message)
    }

    /// Sends `message` to the host logger at trace level.
    ///
    /// # Errors
    ///
    /// Returns the host's [`HostCallError`] unchanged.
    pub fn trace(&self, message: &str) -> Result<(), HostCallError> {
        self.log(LogLevel::Trace, message)
    }
}

#[cfg(test)]
mod tests;
