//! Request and response envelopes exchanged between Tarmac and a guest.
//!
//! The host hands a guest a JSON [`ServerRequest`] whose `payload` carries
//! base64-encoded bytes, and expects exactly one JSON [`ServerResponse`] back.
//! Failures never escape as transport faults: they travel in-band inside the
//! response's [`Status`] sub-record.
//!
//! # Example
//!
//! ```
//! use tac_envelope::{ServerResponse, decode_request, encode_response};
//!
//! let request = decode_request(br#"{"payload":"aGVsbG8="}"#).expect("valid envelope");
//! let bytes = request.decode_payload().expect("valid base64");
//! assert_eq!(bytes, b"hello");
//!
//! let response = ServerResponse::success(b"olleh");
//! assert_eq!(
//!     encode_response(&response),
//!     br#"{"payload":"b2xsZWg=","status":{"code":200,"status":"Success"}}"#,
//! );
//! ```

pub mod codec;
pub mod envelope;
pub mod error;

#[cfg(test)]
mod tests;

pub use self::codec::{
    decode_payload, decode_request, decode_response, encode_payload, encode_response,
    try_encode_response,
};
pub use self::envelope::{ServerRequest, ServerResponse, Status, StatusCode};
pub use self::error::EnvelopeError;
