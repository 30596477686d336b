//! In-process transport: comms between peers inside one process.
//!
//! This crate provides the reference transport for the `corelib` comm
//! contracts. Channels are pairs of in-memory queues, so there is no wire
//! format, no framing and no serialization; messages move between tasks
//! as-is. That makes it useful for:
//!
//! - Running a whole "cluster" inside one process (tests, simulations)
//! - Exercising the connect/listen machinery without touching the network
//! - A template for real wire transports
//!
//! Addresses take the form `inproc://<name>`; names live in a process-wide
//! namespace. Binding `inproc://` (empty location) picks a fresh name, the
//! in-process analogue of a wildcard bind.

pub mod comm;
pub mod connector;
pub mod listener;
mod namespace;

use std::sync::Arc;

use corelib::Registry;

pub use comm::InProcComm;
pub use connector::InProcConnector;
pub use listener::{InProcListener, InProcListenerFactory};

/// Register the `inproc` scheme with `registry`.
///
/// Call once during startup, before any `connect`/`listen` on `inproc://`
/// addresses; registering the scheme twice in the same registry panics.
pub fn register(registry: &Registry) {
    registry.register(
        "inproc",
        Arc::new(InProcConnector),
        Arc::new(InProcListenerFactory),
    );
}
