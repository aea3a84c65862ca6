//! waPC guest ABI binding.
//!
//! Tarmac drives guests through the waPC protocol: the host calls the
//! exported `__guest_call` with the lengths of the operation name and the
//! request, and the guest pulls both buffers with `__guest_request`. Results
//! travel back through `__guest_response` or `__guest_error`.
//!
//! The handler table is built once, either by `wapc_init` or by the first
//! guest call, and is read-only from then on.

use once_cell::sync::OnceCell;

use crate::dispatch::{DispatchError, Dispatcher, tac_routes};
use crate::host::{HostCall, HostCallError, HostLogger};

#[link(wasm_import_module = "wapc")]
unsafe extern "C" {
    fn __guest_request(operation_ptr: *mut u8, payload_ptr: *mut u8);
    fn __guest_response(ptr: *const u8, len: usize);
    fn __guest_error(ptr: *const u8, len: usize);
    fn __host_call(
        binding_ptr: *const u8,
        binding_len: usize,
        namespace_ptr: *const u8,
        namespace_len: usize,
        operation_ptr: *const u8,
        operation_len: usize,
        payload_ptr: *const u8,
        payload_len: usize,
    ) -> usize;
    fn __host_response_len() -> usize;
    fn __host_response(ptr: *mut u8);
    fn __host_error_len() -> usize;
    fn __host_error(ptr: *mut u8);
}

static DISPATCHER: OnceCell<Dispatcher<WapcHost>> = OnceCell::new();

/// [`HostCall`] implementation backed by the waPC `__host_call` import.
///
/// waPC addresses host functions by binding, namespace, and operation; these
/// carry the Tarmac namespace, capability, and operation respectively.
#[derive(Debug, Clone, Copy, Default)]
pub struct WapcHost;

impl HostCall for WapcHost {
    fn call(
        &self,
        namespace: &str,
        capability: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, HostCallError> {
        let succeeded = unsafe {
            __host_call(
                namespace.as_ptr(),
                namespace.len(),
                capability.as_ptr(),
                capability.len(),
                operation.as_ptr(),
                operation.len(),
                payload.as_ptr(),
                payload.len(),
            )
        } == 1;

        if succeeded {
            let mut response = vec![0_u8; unsafe { __host_response_len() }];
            unsafe { __host_response(response.as_mut_ptr()) };
            Ok(response)
        } else {
            let mut error = vec![0_u8; unsafe { __host_error_len() }];
            unsafe { __host_error(error.as_mut_ptr()) };
            Err(HostCallError::rejected(
                namespace,
                capability,
                operation,
                String::from_utf8_lossy(&error),
            ))
        }
    }
}

fn dispatcher() -> Result<&'static Dispatcher<WapcHost>, DispatchError> {
    DISPATCHER.get_or_try_init(|| Ok(Dispatcher::new(tac_routes()?, WapcHost)))
}

/// Registers the guest's handlers. Called by the host after instantiation.
///
/// A failure is sent to the host logger; later guest calls retry the build
/// and report it through `__guest_error`.
#[unsafe(no_mangle)]
pub extern "C" fn wapc_init() {
    if let Err(error) = dispatcher() {
        HostLogger::new(&WapcHost)
            .error(&format!("failed to build handler table: {error}"))
            .ok();
    }
}

/// Entry point for every host-to-guest call.
///
/// Returns `1` when an envelope was produced and `0` when the call could not
/// be routed.
#[unsafe(no_mangle)]
pub extern "C" fn __guest_call(operation_len: i32, payload_len: i32) -> i32 {
    let mut operation = vec![0_u8; usize::try_from(operation_len).unwrap_or_default()];
    let mut payload = vec![0_u8; usize::try_from(payload_len).unwrap_or_default()];
    unsafe { __guest_request(operation.as_mut_ptr(), payload.as_mut_ptr()) };

    let verb = String::from_utf8_lossy(&operation);
    match dispatcher().and_then(|guest| guest.dispatch(&verb, &payload)) {
        Ok(response) => {
            unsafe { __guest_response(response.as_ptr(), response.len()) };
            1
        }
        Err(error) => {
            let message = error.to_string();
            unsafe { __guest_error(message.as_ptr(), message.len()) };
            0
        }
    }
}
