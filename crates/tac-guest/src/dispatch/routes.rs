//! The verb bindings this guest registers with Tarmac.

use super::{DispatchError, HandlerTable};
use crate::handler::{reject, transform};
use crate::host::HostCall;

/// Verb for HTTP `GET` requests.
pub const HTTP_GET: &str = "http:GET";
/// Verb for HTTP `POST` requests.
pub const HTTP_POST: &str = "http:POST";
/// Verb for HTTP `PUT` requests.
pub const HTTP_PUT: &str = "http:PUT";
/// Verb for HTTP `DELETE` requests.
pub const HTTP_DELETE: &str = "http:DELETE";

/// Builds the guest's handler table.
///
/// `POST` and `PUT` reverse the request payload; `GET` and `DELETE` are
/// declined with `503 Not Implemented`.
///
/// # Errors
///
/// Returns a [`DispatchError`] only if the bindings collide, which the fixed
/// verb set rules out.
pub fn tac_routes<H: HostCall>() -> Result<HandlerTable<H>, DispatchError> {
    let mut table = HandlerTable::new();
    table.register(HTTP_GET, reject::<H>)?;
    table.register(HTTP_POST, transform::<H>)?;
    table.register(HTTP_PUT, transform::<H>)?;
    table.register(HTTP_DELETE, reject::<H>)?;
    Ok(table)
}
