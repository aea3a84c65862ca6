//! Verb dispatch for inbound guest calls.
//!
//! The host selects a handler by verb. A [`HandlerTable`] is assembled once
//! at start-up, handed to a [`Dispatcher`] by value, and never modified
//! afterwards. Verbs missing from the table are reported back to the host as
//! [`DispatchError::UnknownVerb`]; there is no fallback handler.

mod routes;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::host::HostCall;

pub use self::routes::{HTTP_DELETE, HTTP_GET, HTTP_POST, HTTP_PUT, tac_routes};

/// Handler signature: host access plus raw request bytes in, envelope out.
pub type HandlerFn<H> = fn(&H, &[u8]) -> Vec<u8>;

/// Errors raised while building a handler table or dispatching a call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The verb is empty or contains whitespace.
    #[error("invalid verb '{verb}'")]
    InvalidVerb {
        /// Rejected verb.
        verb: String,
    },

    /// A handler is already bound to the verb.
    #[error("verb '{verb}' is already registered")]
    DuplicateVerb {
        /// Verb that was registered twice.
        verb: String,
    },

    /// No handler is bound to the verb.
    #[error("no handler registered for verb '{verb}'")]
    UnknownVerb {
        /// Verb requested by the host.
        verb: String,
    },
}

/// Mapping from verb to handler.
///
/// # Example
///
/// ```
/// use tac_guest::dispatch::{HandlerTable, HTTP_GET};
/// use tac_guest::handler::reject;
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
/// let mut table = HandlerTable::<Quiet>::new();
/// table.register(HTTP_GET, reject).expect("fresh verb");
/// assert!(table.register(HTTP_GET, reject).is_err());
/// assert_eq!(table.len(), 1);
/// ```
pub struct HandlerTable<H: ?Sized> {
    handlers: BTreeMap<String, HandlerFn<H>>,
}

impl<H: ?Sized> HandlerTable<H> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Binds `handler` to `verb`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidVerb`] for an empty or whitespace
    /// verb, or [`DispatchError::DuplicateVerb`] if the verb is taken.
    pub fn register(&mut self, verb: &str, handler: HandlerFn<H>) -> Result<(), DispatchError> {
        if verb.is_empty() || verb.chars().any(char::is_whitespace) {
            return Err(DispatchError::InvalidVerb {
                verb: verb.to_owned(),
            });
        }
        if self.handlers.contains_key(verb) {
            return Err(DispatchError::DuplicateVerb {
                verb: verb.to_owned(),
            });
        }
        self.handlers.insert(verb.to_owned(), handler);
        Ok(())
    }

    /// Looks up the handler bound to `verb`.
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<HandlerFn<H>> {
        self.handlers.get(verb).copied()
    }

    /// Returns the registered verbs in lexical order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Returns the number of registered verbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no verbs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: ?Sized> Default for HandlerTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for HandlerTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.verbs()).finish()
    }
}

/// Routes calls through a frozen [`HandlerTable`] with access to the host.
#[derive(Debug)]
pub struct Dispatcher<H> {
    table: HandlerTable<H>,
    host: H,
}

impl<H> Dispatcher<H> {
    /// Creates a dispatcher. The table cannot be changed afterwards.
    #[must_use]
    pub const fn new(table: HandlerTable<H>, host: H) -> Self {
        Self { table, host }
    }

    /// Returns the handler table.
    #[must_use]
    pub const fn table(&self) -> &HandlerTable<H> {
        &self.table
    }

    /// Returns the host the handlers are given.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostCall> Dispatcher<H> {
    /// Runs the handler bound to `verb` over `input`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownVerb`] when no handler is bound to the
    /// verb. Handler failures are never errors; they are encoded in the
    /// returned envelope.
    pub fn dispatch(&self, verb: &str, input: &[u8]) -> Result<Vec<u8>, DispatchError> {
        let handler = self.table.get(verb).ok_or_else(|| {
            tracing::debug!(verb, "no handler registered");
            DispatchError::UnknownVerb {
                verb: verb.to_owned(),
            }
        })?;
        tracing::debug!(verb, input_len = input.len(), "dispatching guest call");
        Ok(handler(&self.host, input))
    }
}
