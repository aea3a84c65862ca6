//! Envelope types for the Tarmac server protocol.
//!
//! A [`ServerRequest`] arrives once per invocation and is discarded when the
//! handler returns. A [`ServerResponse`] is built fresh for every invocation
//! and returned to the host by value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec;
use crate::error::EnvelopeError;

/// Request envelope delivered by the host.
///
/// Only `payload` is consulted by the guest; `headers` is carried so that
/// envelopes produced by the HTTP front end decode without loss.
///
/// Requests are read leniently (see [`decode_request`](crate::decode_request)):
/// any JSON document is accepted, and a `payload` that is absent or not a
/// string reads as empty.
///
/// # Example
///
/// ```
/// use tac_envelope::ServerRequest;
///
/// let request = ServerRequest::from_bytes(b"hello");
/// assert_eq!(request.payload(), "aGVsbG8=");
/// assert_eq!(request.decode_payload().expect("valid base64"), b"hello");
/// ```
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ServerRequest {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
    payload: String,
}

impl ServerRequest {
    /// Creates a request carrying an already base64-encoded payload.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            headers: BTreeMap::new(),
            payload: payload.into(),
        }
    }

    /// Creates a request whose payload is the base64 encoding of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(codec::encode_payload(bytes))
    }

    /// Reads a request out of an arbitrary JSON document.
    ///
    /// Fields of the wrong type are treated as absent, as are all fields of a
    /// document that is not an object.
    pub(crate) fn from_document(document: &Value) -> Self {
        let payload = document
            .get("payload")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let headers: BTreeMap<String, String> = document
            .get("headers")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|(name, value)| {
                        value.as_str().map(|text| (name.clone(), text.to_owned()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            headers,
            payload: payload.to_owned(),
        }
    }

    /// Attaches a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the encoded payload text.
    #[must_use]
    pub const fn payload(&self) -> &str {
        self.payload.as_str()
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Decodes the payload from base64.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Payload`] when the payload is not valid
    /// standard-alphabet, padded base64.
    pub fn decode_payload(&self) -> Result<Vec<u8>, EnvelopeError> {
        codec::decode_payload(&self.payload)
    }
}

/// Response envelope returned to the host.
///
/// The `payload` key is omitted entirely when no payload is present, which
/// is the case on every non-success path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerResponse {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    status: Status,
}

impl ServerResponse {
    /// Creates a `200 Success` response carrying `bytes` as its payload.
    #[must_use]
    pub fn success(bytes: &[u8]) -> Self {
        Self {
            headers: BTreeMap::new(),
            payload: Some(codec::encode_payload(bytes)),
            status: Status::from_code(StatusCode::Success),
        }
    }

    /// Creates a `500` response whose status text is `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::without_payload(Status::new(StatusCode::Failed, message))
    }

    /// Creates the `503 Not Implemented` response.
    #[must_use]
    pub fn not_implemented() -> Self {
        Self::without_payload(Status::from_code(StatusCode::NotImplemented))
    }

    const fn without_payload(status: Status) -> Self {
        Self {
            headers: BTreeMap::new(),
            payload: None,
            status,
        }
    }

    /// Attaches a header to the response.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the encoded payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Returns the status sub-record.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns `true` when the status code is `200`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.status_code() == Some(StatusCode::Success)
    }

    /// Decodes the payload from base64.
    ///
    /// Returns `Ok(None)` when the response carries no payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Payload`] when the payload is not valid base64.
    pub fn decode_payload(&self) -> Result<Option<Vec<u8>>, EnvelopeError> {
        self.payload.as_deref().map(codec::decode_payload).transpose()
    }
}

/// In-band status carried by every response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    code: u16,
    status: String,
}

impl Status {
    /// Creates a status with an explicit message.
    #[must_use]
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            status: message.into(),
        }
    }

    /// Creates a status using the canonical reason text for `code`.
    #[must_use]
    pub fn from_code(code: StatusCode) -> Self {
        Self::new(code, code.reason())
    }

    /// Returns the numeric code as transmitted.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Returns the status message.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.status.as_str()
    }

    /// Returns the typed code when it belongs to the known set.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::try_from(self.code).ok()
    }
}

/// The closed set of codes emitted by this guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The request was processed.
    Success,
    /// Processing failed; the status text describes why.
    Failed,
    /// The verb is registered but deliberately not serviced.
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Failed => 500,
            Self::NotImplemented => 503,
        }
    }

    /// Returns the canonical reason text.
    ///
    /// `Failed` has no fixed text; responses with that code always carry a
    /// diagnostic message instead.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::NotImplemented => "Not Implemented",
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            200 => Ok(Self::Success),
            500 => Ok(Self::Failed),
            503 => Ok(Self::NotImplemented),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests;
