//! The `Listener` contract: a bound acceptor producing `Comm`s.
//!
//! A listener is created in a stopped state by a
//! [`ListenerFactory`](crate::registry::ListenerFactory); `start()`
//! transitions it to accepting, `stop()` back to not-accepting. Stopping
//! never affects `Comm`s already handed to the handler, since ownership of
//! each accepted `Comm` transfers to the handler on delivery.
//!
//! [`ListenerGuard`] provides scoped acquisition: `start()` on entry and
//! `stop()` exactly once on every exit path, including early error returns
//! and panics.

use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::comm::Comm;
use crate::error::Result;

/// Future returned by a comm handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Callback invoked by a listener with each accepted [`Comm`].
///
/// The listener does not serialize invocations: a handler may be running for
/// one connection while the next is accepted, so handlers must be
/// independently reentrant. Each invocation owns its `Comm`.
pub type CommHandler = Arc<dyn Fn(Box<dyn Comm>) -> HandlerFuture + Send + Sync>;

/// Lift an async closure into a [`CommHandler`].
///
/// # Example
///
/// ```rust
/// use corelib::{comm_handler, Comm};
///
/// let handler = comm_handler(|mut comm| async move {
///     while let Ok(msg) = comm.read().await {
///         if comm.write(msg).await.is_err() {
///             break;
///         }
///     }
/// });
/// ```
pub fn comm_handler<F, Fut>(f: F) -> CommHandler
where
    F: Fn(Box<dyn Comm>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |comm| -> HandlerFuture { Box::pin(f(comm)) })
}

/// A bound acceptor for one address.
#[async_trait]
pub trait Listener: Send {
    /// Start accepting incoming connections.
    ///
    /// For each accepted connection the caller-supplied handler is invoked
    /// with a new [`Comm`]. Handler invocations may run synchronously or be
    /// scheduled independently.
    async fn start(&mut self) -> Result<()>;

    /// Stop accepting new connections.
    ///
    /// Does not shut down communications already handed to the handler.
    /// Synchronous so it can run from a guard's `Drop`.
    fn stop(&mut self);

    /// The listening address as a URI string. May contain wildcards such as
    /// `tcp://0.0.0.0:123`.
    fn listen_address(&self) -> String;

    /// An address this listener can be contacted on: wildcards resolved to
    /// something other peers can actually dial.
    fn contact_address(&self) -> String;
}

impl std::fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("listen_address", &self.listen_address())
            .finish()
    }
}

/// Scoped acquisition of a [`Listener`].
///
/// Entering the scope (via [`ListenerGuard::start`]) starts the listener;
/// dropping the guard (on the normal path, an early `?` return, or a panic
/// unwind) stops it exactly once.
///
/// # Example
///
/// ```rust,no_run
/// # use corelib::{listen, comm_handler, ListenerGuard, Result};
/// # async fn example() -> Result<()> {
/// let listener = listen("inproc://worker-3", comm_handler(|_comm| async {}), true)?;
/// let guard = ListenerGuard::start(listener).await?;
/// let contact = guard.contact_address();
/// // ... accept connections ...
/// drop(guard); // stop() runs here
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ListenerGuard {
    listener: Box<dyn Listener>,
    stopped: bool,
}

impl ListenerGuard {
    /// Start `listener` and wrap it in a guard.
    ///
    /// If `start()` fails the listener is discarded without a `stop()` call
    /// (it never began accepting).
    pub async fn start(mut listener: Box<dyn Listener>) -> Result<ListenerGuard> {
        listener.start().await?;
        Ok(ListenerGuard {
            listener,
            stopped: false,
        })
    }

    /// Stop the listener now instead of waiting for drop.
    pub fn stop(mut self) {
        self.listener.stop();
        self.stopped = true;
    }
}

impl Deref for ListenerGuard {
    type Target = dyn Listener;

    fn deref(&self) -> &Self::Target {
        &*self.listener
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if !self.stopped {
            self.listener.stop();
        }
    }
}
