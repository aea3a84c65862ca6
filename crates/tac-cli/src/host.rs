//! Native stand-in for the Tarmac host capabilities.

use tac_guest::host::{HostCall, HostCallError, LOGGER_CAPABILITY, LogLevel, TARMAC_NAMESPACE};

/// `tracing` target under which guest log lines are emitted.
pub const GUEST_LOG_TARGET: &str = "tac::guest";

/// Serves the Tarmac logger capability by emitting `tracing` events.
///
/// Every other capability is reported as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHost;

impl HostCall for TracingHost {
    fn call(
        &self,
        namespace: &str,
        capability: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, HostCallError> {
        let level = (namespace == TARMAC_NAMESPACE && capability == LOGGER_CAPABILITY)
            .then(|| LogLevel::from_operation(operation))
            .flatten()
            .ok_or_else(|| HostCallError::unsupported(namespace, capability, operation))?;

        let message = String::from_utf8_lossy(payload);
        match level {
            LogLevel::Error => tracing::error!(target: GUEST_LOG_TARGET, "{message}"),
            LogLevel::Warn => tracing::warn!(target: GUEST_LOG_TARGET, "{message}"),
            LogLevel::Info => tracing::info!(target: GUEST_LOG_TARGET, "{message}"),
            LogLevel::Debug => tracing::debug!(target: GUEST_LOG_TARGET, "{message}"),
            LogLevel::Trace => tracing::trace!(target: GUEST_LOG_TARGET, "{message}"),
        }
        Ok(Vec::new())
    }
}
