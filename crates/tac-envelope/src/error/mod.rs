//! Errors raised while decoding or encoding envelopes.

use thiserror::Error;

/// Errors arising from envelope codec operations.
///
/// The variants carry the rendered message of the underlying library error
/// so the value stays `Clone` and cheap to embed in a response status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The input bytes were not a well-formed envelope document.
    #[error("malformed envelope: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },

    /// The `payload` field was not valid base64.
    #[error("invalid base64 payload: {message}")]
    Payload {
        /// Decoder diagnostic.
        message: String,
    },

    /// The envelope could not be serialised.
    #[error("failed to encode envelope: {message}")]
    Encode {
        /// Serialiser diagnostic.
        message: String,
    },
}

impl EnvelopeError {
    /// Builds a [`EnvelopeError::Parse`] from a JSON error.
    #[must_use]
    pub fn parse(source: &serde_json::Error) -> Self {
        Self::Parse {
            message: source.to_string(),
        }
    }

    /// Builds a [`EnvelopeError::Payload`] from a base64 error.
    #[must_use]
    pub fn payload(source: &base64::DecodeError) -> Self {
        Self::Payload {
            message: source.to_string(),
        }
    }
}
