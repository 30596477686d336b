//! The listen factory: registry lookup plus listener construction.

use crate::address::parse_address;
use crate::error::{CommError, Result};
use crate::listener::{CommHandler, Listener};
use crate::registry::Registry;

/// Create a listener for `addr` (a URI such as `tcp://0.0.0.0:0`) through
/// the process-wide registry.
///
/// When the listener's `start()` method is called it begins accepting on the
/// given address and invokes `handler` with a [`Comm`](crate::comm::Comm)
/// for each incoming connection. Construction alone does not start
/// accepting.
pub fn listen(addr: &str, handler: CommHandler, deserialize: bool) -> Result<Box<dyn Listener>> {
    listen_with(Registry::global(), addr, handler, deserialize)
}

/// Create a listener for `addr` through an explicit registry.
///
/// # Errors
///
/// - [`CommError::InvalidAddress`] if `addr` is not `scheme://location`.
/// - [`CommError::UnknownScheme`] if the scheme has no registered listener
///   factory.
/// - Any error the transport's factory reports while binding.
pub fn listen_with(
    registry: &Registry,
    addr: &str,
    handler: CommHandler,
    deserialize: bool,
) -> Result<Box<dyn Listener>> {
    let address = parse_address(addr)?;
    let factory =
        registry
            .listener_factory(&address.scheme)
            .ok_or_else(|| CommError::UnknownScheme {
                scheme: address.scheme.clone(),
                address: addr.to_string(),
            })?;
    factory.bind(&address.location, handler, deserialize)
}
