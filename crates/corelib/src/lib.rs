//! Core library for transport-agnostic communication.
//!
//! This crate provides the fundamental abstractions for message-oriented
//! communication between distributed-system peers:
//! - Address parsing (`scheme://location` URIs)
//! - The `Comm` contract every transport channel satisfies
//! - The `Listener` contract every transport acceptor satisfies
//! - The scheme registry mapping transports to connectors/listener factories
//! - The deadline-bounded `connect` retry algorithm
//! - The `listen` factory

pub mod address;
pub mod comm;
pub mod connect;
pub mod error;
pub mod listen;
pub mod listener;
pub mod registry;

pub use address::{parse_address, Address};
pub use comm::Comm;
pub use connect::{connect, connect_with, ConnectOptions};
pub use error::{CommError, Result};
pub use listen::{listen, listen_with};
pub use listener::{comm_handler, CommHandler, Listener, ListenerGuard};
pub use registry::{Connector, ListenerFactory, Registry};
