//! The in-process connector.

use async_trait::async_trait;

use corelib::error::Result;
use corelib::registry::Connector;
use corelib::Comm;

use crate::namespace::NAMESPACE;

/// Connector for the `inproc` scheme.
///
/// One attempt either finds a started listener at the location and returns
/// the client half of a fresh comm pair, or reports a transient "connection
/// refused" for the core retry loop to handle. There is no partial state to
/// clean up on failure.
pub struct InProcConnector;

#[async_trait]
impl Connector for InProcConnector {
    async fn connect(&self, location: &str, deserialize: bool) -> Result<Box<dyn Comm>> {
        let comm = NAMESPACE.dial(location, deserialize)?;
        tracing::trace!(location, peer = %comm.peer_address(), "inproc dial succeeded");
        Ok(Box::new(comm))
    }
}
