//! Address parsing for transport URIs.
//!
//! Addresses take the form `scheme://location`, e.g. `tcp://127.0.0.1:1234`
//! or `inproc://worker-3`. The scheme selects a transport in the registry;
//! the location is opaque to this crate and handed to the transport as-is.

use std::fmt;

use crate::error::{CommError, Result};

/// A parsed transport address: a `(scheme, location)` pair.
///
/// Immutable once parsed. The scheme is matched case-sensitively against
/// registered transports; the location's interpretation belongs entirely to
/// the transport (host:port for TCP, an arbitrary name for in-process, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub scheme: String,
    pub location: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.location)
    }
}

/// Parse a `scheme://location` URI into an [`Address`].
///
/// The split happens at the first `"://"`; anything after it (including
/// further `://` sequences) is part of the location. Fails with
/// [`CommError::InvalidAddress`] when the separator is missing or the scheme
/// is empty. An empty location is allowed: some transports treat it as a
/// wildcard bind.
pub fn parse_address(addr: &str) -> Result<Address> {
    let (scheme, location) = addr
        .split_once("://")
        .ok_or_else(|| CommError::InvalidAddress(addr.to_string()))?;
    if scheme.is_empty() {
        return Err(CommError::InvalidAddress(addr.to_string()));
    }
    Ok(Address {
        scheme: scheme.to_string(),
        location: location.to_string(),
    })
}
