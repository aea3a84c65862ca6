//! Tarmac guest that reverses request payloads.
//!
//! The guest registers four verbs with the host. `http:POST` and `http:PUT`
//! decode the request envelope, log the payload through the host's logger
//! capability, and answer with the payload reversed. `http:GET` and
//! `http:DELETE` are declined with `503 Not Implemented`.
//!
//! Every registered verb answers with exactly one response envelope; failures
//! are reported in the envelope's status, never as a transport fault.
//!
//! # Architecture
//!
//! - [`transform`] reverses byte sequences.
//! - [`host`] abstracts host capability calls behind [`host::HostCall`].
//! - [`handler`] holds the reject and transform handlers.
//! - [`dispatch`] maps verbs to handlers through an immutable table.
//! - `wapc` (wasm32 only) exports the waPC guest ABI.
//!
//! # Example
//!
//! ```
//! use tac_guest::dispatch::{Dispatcher, HTTP_POST, tac_routes};
//! use tac_guest::host::{HostCall, HostCallError};
//!
//! struct Quiet;
//!
//! impl HostCall for Quiet {
//!     fn call(&self, _: &str, _: &str, _: &str, _: &[u8]) -> Result<Vec<u8>, HostCallError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new(tac_routes().expect("fixed routes"), Quiet);
//! let output = dispatcher
//!     .dispatch(HTTP_POST, br#"{"payload":"aGVsbG8="}"#)
//!     .expect("registered verb");
//! assert_eq!(
//!     output,
//!     br#"{"payload":"b2xsZWg=","status":{"code":200,"status":"Success"}}"#,
//! );
//! ```

pub mod dispatch;
pub mod handler;
pub mod host;
pub mod transform;

#[cfg(target_arch = "wasm32")]
pub mod wapc;

#[cfg(test)]
mod tests;

pub use self::dispatch::{DispatchError, Dispatcher, HandlerFn, HandlerTable, tac_routes};
pub use self::handler::HandlerError;
pub use self::host::{HostCall, HostCallError, HostLogger, LogLevel};
