//! JSON and base64 encoding rules for envelopes.
//!
//! Payloads use the standard base64 alphabet with padding. Envelopes are
//! compact UTF-8 JSON with keys in declaration order.
//!
//! Decoding is forgiving in the places Tarmac's own clients are: line breaks
//! inside a payload are skipped and non-zero trailing bits are accepted.

use std::borrow::Cow;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use crate::envelope::{ServerRequest, ServerResponse};
use crate::error::EnvelopeError;

/// Standard padded alphabet, tolerant of non-canonical trailing bits.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Envelope emitted if a response ever fails to serialise.
const ENCODE_FAILURE_ENVELOPE: &[u8] =
    br#"{"status":{"code":500,"status":"Failed to encode response"}}"#;

/// Parses a request envelope from raw bytes.
///
/// Any well-formed JSON document is accepted. The payload is the string
/// value of its top-level `payload` key; when that key is missing, is not a
/// string, or the document is not an object, the payload is empty.
///
/// # Errors
///
/// Returns [`EnvelopeError::Parse`] when the bytes are not JSON.
pub fn decode_request(bytes: &[u8]) -> Result<ServerRequest, EnvelopeError> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|error| EnvelopeError::parse(&error))?;
    Ok(ServerRequest::from_document(&document))
}

/// Parses a response envelope from raw bytes.
///
/// # Errors
///
/// Returns [`EnvelopeError::Parse`] when the bytes are not a response
/// envelope.
pub fn decode_response(bytes: &[u8]) -> Result<ServerResponse, EnvelopeError> {
    serde_json::from_slice(bytes).map_err(|error| EnvelopeError::parse(&error))
}

/// Serialises a response envelope, reporting serialiser failures.
///
/// # Errors
///
/// Returns [`EnvelopeError::Encode`] if `serde_json` rejects the value.
pub fn try_encode_response(response: &ServerResponse) -> Result<Vec<u8>, EnvelopeError> {
    serde_json::to_vec(response).map_err(|error| EnvelopeError::Encode {
        message: error.to_string(),
    })
}

/// Serialises a response envelope.
///
/// Always yields a well-formed envelope: should serialisation fail, the
/// fixed `500` envelope is returned in its place.
#[must_use]
pub fn encode_response(response: &ServerResponse) -> Vec<u8> {
    try_encode_response(response).unwrap_or_else(|_| ENCODE_FAILURE_ENVELOPE.to_vec())
}

/// Encodes raw bytes as standard padded base64.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> String {
    PAYLOAD_ENGINE.encode(bytes)
}

/// Decodes standard padded base64 text into raw bytes.
///
/// Carriage returns and line feeds are ignored wherever they appear.
///
/// # Errors
///
/// Returns [`EnvelopeError::Payload`] when the text is not valid base64.
pub fn decode_payload(text: &str) -> Result<Vec<u8>, EnvelopeError> {
    let unwrapped: Cow<'_, str> = if text.contains(['\r', '\n']) {
        Cow::Owned(text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(text)
    };
    PAYLOAD_ENGINE
        .decode(unwrapped.as_bytes())
        .map_err(|error| EnvelopeError::payload(&error))
}
