//! The `Comm` contract: one established, full-duplex message channel.
//!
//! A `Comm` represents an established communication channel to exactly one
//! peer. Messages are opaque [`Bytes`] payloads; concrete transports decide
//! how they are framed and (de)serialized on the wire.
//!
//! # Ordering
//!
//! Messages on a single `Comm` are strictly FIFO in each direction. No
//! ordering is implied across distinct `Comm`s, even to the same peer.
//!
//! # One reader, one writer
//!
//! There must be at most one outstanding `read` and at most one outstanding
//! `write` at any time. The `&mut self` receivers enforce this by
//! construction: to run several conversations with a peer, open several
//! `Comm`s rather than sharing one.
//!
//! # Lifecycle
//!
//! Created by a [`Connector`](crate::registry::Connector) (outbound) or by a
//! [`Listener`](crate::listener::Listener) on accept (inbound). Destroyed by
//! `close()` (graceful) or `abort()` (immediate). Once closed, a `Comm` is
//! permanently closed; there is no reopening.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A message-oriented communication channel to a single peer.
#[async_trait]
pub trait Comm: Send + fmt::Debug {
    /// Read and return the next message.
    ///
    /// Suspends until a message arrives. Messages are delivered in the order
    /// the peer wrote them. Fails with [`CommError::Closed`] if the peer
    /// closed the channel or it was closed/aborted locally.
    ///
    /// [`CommError::Closed`]: crate::error::CommError::Closed
    async fn read(&mut self) -> Result<Bytes>;

    /// Write one message.
    ///
    /// On success the message has been handed to the underlying transport;
    /// that does not imply the peer has acknowledged it. Fails with
    /// [`CommError::Closed`] on a closed or aborted channel.
    ///
    /// [`CommError::Closed`]: crate::error::CommError::Closed
    async fn write(&mut self, msg: Bytes) -> Result<()>;

    /// Close the channel cleanly.
    ///
    /// Attempts to flush outgoing buffers before releasing the underlying
    /// transport. Idempotent: closing an already-closed `Comm` is a no-op,
    /// not an error.
    async fn close(&mut self) -> Result<()>;

    /// Close the channel immediately and abruptly, discarding any unflushed
    /// outgoing data.
    ///
    /// Always safe to call, including from failure-cleanup paths and `Drop`
    /// implementations (it never suspends).
    fn abort(&mut self);

    /// Whether the channel is closed. Never suspends.
    fn closed(&self) -> bool;

    /// The peer's address, for logging and debugging purposes only.
    ///
    /// Not guaranteed unique or authenticated.
    fn peer_address(&self) -> String;
}
