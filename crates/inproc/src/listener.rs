//! The in-process listener and its factory.

use async_trait::async_trait;
use tokio::task::JoinHandle;

use corelib::error::Result;
use corelib::listener::{CommHandler, Listener};
use corelib::registry::ListenerFactory;

use crate::namespace::NAMESPACE;

/// Listener for the `inproc` scheme.
///
/// `start()` claims the location in the process-wide namespace and spawns an
/// accept task; each accepted comm is handed to the handler in its own task,
/// so handler invocations are never serialized. `stop()` releases the
/// location and tears down the accept task without touching comms already
/// delivered.
pub struct InProcListener {
    /// Location as requested by the caller; empty for a wildcard bind.
    requested: String,
    /// Location actually bound; wildcards resolved to a fresh name.
    bound: String,
    handler: CommHandler,
    deserialize: bool,
    accept_task: Option<JoinHandle<()>>,
}

impl InProcListener {
    fn new(location: &str, handler: CommHandler, deserialize: bool) -> Self {
        let bound = if location.is_empty() {
            NAMESPACE.assign_location()
        } else {
            location.to_string()
        };
        Self {
            requested: location.to_string(),
            bound,
            handler,
            deserialize,
            accept_task: None,
        }
    }
}

#[async_trait]
impl Listener for InProcListener {
    async fn start(&mut self) -> Result<()> {
        let mut accepted = NAMESPACE.claim(&self.bound, self.deserialize)?;
        tracing::debug!(location = %self.bound, "inproc listener started");

        let handler = self.handler.clone();
        self.accept_task = Some(tokio::spawn(async move {
            while let Some(comm) = accepted.recv().await {
                // Each handler invocation runs independently; a slow handler
                // must not hold up the accept loop.
                tokio::spawn(handler.as_ref()(Box::new(comm)));
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        // Only a started listener holds a namespace claim.
        if let Some(task) = self.accept_task.take() {
            NAMESPACE.release(&self.bound);
            task.abort();
            tracing::debug!(location = %self.bound, "inproc listener stopped");
        }
    }

    fn listen_address(&self) -> String {
        format!("inproc://{}", self.requested)
    }

    fn contact_address(&self) -> String {
        format!("inproc://{}", self.bound)
    }
}

/// Factory for [`InProcListener`]s; registered under the `inproc` scheme.
pub struct InProcListenerFactory;

impl ListenerFactory for InProcListenerFactory {
    fn bind(
        &self,
        location: &str,
        handler: CommHandler,
        deserialize: bool,
    ) -> Result<Box<dyn Listener>> {
        Ok(Box::new(InProcListener::new(location, handler, deserialize)))
    }
}
