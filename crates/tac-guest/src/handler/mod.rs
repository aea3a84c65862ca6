//! Guest handlers bound to inbound verbs.
//!
//! Both handlers return encoded response envelope bytes on every path. Any
//! failure is reported through the envelope's status rather than to the
//! host, so the transport result of a guest call is always success.

use tac_envelope::{EnvelopeError, ServerResponse, decode_request, encode_response};
use thiserror::Error;

use crate::host::{HostCall, HostCallError, HostLogger};
use crate::transform;

/// Failures of the transform handler, rendered into the `500` status text.
///
/// The underlying error is part of the message rather than a separate
/// source, so the status text is complete on its own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The request bytes were not a request envelope.
    #[error("Failed to call parse json - {0}")]
    Parse(EnvelopeError),

    /// The request payload was not valid base64.
    #[error("Failed to perform base64 decode - {0}")]
    Decode(EnvelopeError),

    /// The host logger call failed.
    #[error("Failed to call host callback - {0}")]
    HostCallback(HostCallError),
}

/// Declines the request with `503 Not Implemented`.
///
/// The input is never inspected and the host is never called.
#[must_use]
pub fn reject<H: HostCall + ?Sized>(_host: &H, _input: &[u8]) -> Vec<u8> {
    encode_response(&ServerResponse::not_implemented())
}

/// Decodes the request payload, logs it through the host, and returns it
/// reversed.
///
/// # Example
///
/// ```
/// use tac_guest::handler::transform;
/// use tac_guest::host::{HostCall, HostCallError};
///
/// struct Quiet;
///
/// impl HostCall for Quiet {
///     fn call(&self, _: &str, _: &str, _: &str, _: &[u8]) -> Result<Vec<u8>, HostCallError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let output = transform(&Quiet, br#"{"payload":"aGVsbG8="}"#);
/// assert_eq!(
///     output,
///     br#"{"payload":"b2xsZWg=","status":{"code":200,"status":"Success"}}"#,
/// );
/// ```
#[must_use]
pub fn transform<H: HostCall + ?Sized>(host: &H, input: &[u8]) -> Vec<u8> {
    let response = match reverse_payload(host, input) {
        Ok(bytes) => ServerResponse::success(&bytes),
        Err(error) => {
            tracing::warn!(error = %error, "transform request failed");
            ServerResponse::failure(error.to_string())
        }
    };
    encode_response(&response)
}

/// Runs the transform pipeline up to, but not including, response encoding.
///
/// # Errors
///
/// Returns the first [`HandlerError`] encountered; later steps are skipped.
pub fn reverse_payload<H: HostCall + ?Sized>(
    host: &H,
    input: &[u8],
) -> Result<Vec<u8>, HandlerError> {
    let request = decode_request(input).map_err(HandlerError::Parse)?;
    let payload = request.decode_payload().map_err(HandlerError::Decode)?;

    HostLogger::new(host)
        .trace(&format!(
            "Reversing Payload: {}",
            String::from_utf8_lossy(&payload)
        ))
        .map_err(HandlerError::HostCallback)?;

    Ok(transform::reversed(payload))
}
