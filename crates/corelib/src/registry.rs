//! Scheme registry: process-wide mapping from transport scheme to backend.
//!
//! Each transport registers a [`Connector`] (outbound) and a
//! [`ListenerFactory`] (inbound) under its scheme name, e.g. `"tcp"` or
//! `"inproc"`. Registration happens once per scheme during process startup,
//! before any `connect`/`listen` call; afterwards the registry is read-only.
//! Re-registering a scheme panics: the registry is append-only and a
//! duplicate registration is a programming error, not a runtime condition.
//!
//! Lookups are far more frequent than registrations, so the map sits behind
//! a `parking_lot::RwLock`: registrations take the write lock, lookups share
//! the read lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::comm::Comm;
use crate::error::Result;
use crate::listener::{CommHandler, Listener};

/// Per-scheme factory performing a single outbound connection attempt.
///
/// Owned by the transport implementation. A transient, environment-class
/// failure (peer not listening yet, connection refused) is reported as
/// [`CommError::Transient`] so the connect loop can retry it; any other
/// error propagates to the caller unchanged. A failed attempt must clean up
/// its own partial state; the retry loop will not.
///
/// [`CommError::Transient`]: crate::error::CommError::Transient
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt one connection to `location` (the part of the address after
    /// `scheme://`). `deserialize` is forwarded from the caller and opaque
    /// to the core.
    async fn connect(&self, location: &str, deserialize: bool) -> Result<Box<dyn Comm>>;
}

/// Per-scheme factory constructing a [`Listener`].
pub trait ListenerFactory: Send + Sync {
    /// Construct a listener bound to `location` that will hand each accepted
    /// [`Comm`] to `handler`.
    ///
    /// Construction must not start accepting; `Listener::start()` is a
    /// separate, explicit step.
    fn bind(
        &self,
        location: &str,
        handler: CommHandler,
        deserialize: bool,
    ) -> Result<Box<dyn Listener>>;
}

struct Backend {
    connector: Arc<dyn Connector>,
    listener_factory: Arc<dyn ListenerFactory>,
}

/// Process-wide mapping from scheme name to transport backend.
///
/// Commonly accessed through [`Registry::global`], but tests and embedders
/// can build private registries with [`Registry::new`].
pub struct Registry {
    schemes: RwLock<HashMap<String, Backend>>,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            schemes: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide default registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a transport backend under `scheme`.
    ///
    /// Must complete before any `connect`/`listen` call that uses the
    /// scheme. Scheme names are case-sensitive.
    ///
    /// # Panics
    ///
    /// Panics if `scheme` is already registered. There is no unregistration,
    /// so a duplicate registration can only be a startup-ordering bug.
    pub fn register(
        &self,
        scheme: &str,
        connector: Arc<dyn Connector>,
        listener_factory: Arc<dyn ListenerFactory>,
    ) {
        let mut schemes = self.schemes.write();
        if schemes.contains_key(scheme) {
            panic!("scheme {:?} is already registered", scheme);
        }
        tracing::debug!(scheme, "registering transport scheme");
        schemes.insert(
            scheme.to_string(),
            Backend {
                connector,
                listener_factory,
            },
        );
    }

    /// Look up the connector for `scheme`, if registered.
    pub fn connector(&self, scheme: &str) -> Option<Arc<dyn Connector>> {
        self.schemes
            .read()
            .get(scheme)
            .map(|backend| Arc::clone(&backend.connector))
    }

    /// Look up the listener factory for `scheme`, if registered.
    pub fn listener_factory(&self, scheme: &str) -> Option<Arc<dyn ListenerFactory>> {
        self.schemes
            .read()
            .get(scheme)
            .map(|backend| Arc::clone(&backend.listener_factory))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
