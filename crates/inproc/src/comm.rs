//! The in-process comm: a pair of in-memory message queues.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use corelib::error::{CommError, Result};
use corelib::Comm;

/// One endpoint of an in-process channel.
///
/// Each endpoint owns the send half of one queue and the receive half of the
/// other, so the two directions are independent and each is FIFO by
/// construction. The queues are unbounded: `write` never blocks on a slow
/// peer, matching the "handed to the transport" success contract.
///
/// Closing drops the send half. The peer still drains whatever was already
/// queued (the in-process equivalent of flushing outgoing buffers) and
/// then sees [`CommError::Closed`] on the next read. Nothing is ever
/// buffered outside the queues, so `abort` and `close` coincide here.
#[derive(Debug)]
pub struct InProcComm {
    local_address: String,
    peer_address: String,
    deserialize: bool,
    outgoing: Option<mpsc::UnboundedSender<Bytes>>,
    incoming: mpsc::UnboundedReceiver<Bytes>,
    closed: bool,
}

impl InProcComm {
    /// Build a connected pair of endpoints.
    ///
    /// Each side is described by its own address and `deserialize` flag; the
    /// flag is carried for symmetry with wire transports and does not change
    /// behavior here (messages are already in-memory values).
    pub(crate) fn pair(a: (String, bool), b: (String, bool)) -> (InProcComm, InProcComm) {
        let (a_to_b_tx, a_to_b_rx) = mpsc::unbounded_channel();
        let (b_to_a_tx, b_to_a_rx) = mpsc::unbounded_channel();
        let (a_address, a_deserialize) = a;
        let (b_address, b_deserialize) = b;
        let side_a = InProcComm {
            local_address: a_address.clone(),
            peer_address: b_address.clone(),
            deserialize: a_deserialize,
            outgoing: Some(a_to_b_tx),
            incoming: b_to_a_rx,
            closed: false,
        };
        let side_b = InProcComm {
            local_address: b_address,
            peer_address: a_address,
            deserialize: b_deserialize,
            outgoing: Some(b_to_a_tx),
            incoming: a_to_b_rx,
            closed: false,
        };
        (side_a, side_b)
    }

    /// This endpoint's own address, for logging and debugging.
    pub fn local_address(&self) -> String {
        self.local_address.clone()
    }

    /// The deserialize flag this endpoint was created with.
    pub fn deserialize(&self) -> bool {
        self.deserialize
    }

    fn release(&mut self) {
        self.outgoing = None;
        self.closed = true;
    }
}

#[async_trait]
impl Comm for InProcComm {
    async fn read(&mut self) -> Result<Bytes> {
        if self.closed {
            return Err(CommError::Closed);
        }
        match self.incoming.recv().await {
            Some(msg) => Ok(msg),
            None => {
                // Peer closed and everything it queued has been drained.
                self.closed = true;
                Err(CommError::Closed)
            }
        }
    }

    async fn write(&mut self, msg: Bytes) -> Result<()> {
        if self.closed {
            return Err(CommError::Closed);
        }
        let outgoing = self.outgoing.as_ref().ok_or(CommError::Closed)?;
        outgoing.send(msg).map_err(|_| CommError::Closed)
    }

    async fn close(&mut self) -> Result<()> {
        // Idempotent: closing twice is a no-op.
        self.release();
        Ok(())
    }

    fn abort(&mut self) {
        self.release();
    }

    fn closed(&self) -> bool {
        self.closed
    }

    fn peer_address(&self) -> String {
        self.peer_address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (InProcComm, InProcComm) {
        InProcComm::pair(
            ("inproc://client-1".to_string(), true),
            ("inproc://server-1".to_string(), true),
        )
    }

    #[tokio::test]
    async fn test_messages_are_fifo_in_both_directions() {
        let (mut a, mut b) = pair();

        for i in 0..100u8 {
            a.write(Bytes::from(vec![i])).await.unwrap();
            b.write(Bytes::from(vec![100 + i])).await.unwrap();
        }
        for i in 0..100u8 {
            assert_eq!(b.read().await.unwrap(), Bytes::from(vec![i]));
            assert_eq!(a.read().await.unwrap(), Bytes::from(vec![100 + i]));
        }
    }

    #[tokio::test]
    async fn test_addresses_are_symmetric() {
        let (a, b) = pair();
        assert_eq!(a.peer_address(), b.local_address());
        assert_eq!(b.peer_address(), a.local_address());
        assert!(a.deserialize());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_observable() {
        let (mut a, _b) = pair();
        assert!(!a.closed());

        a.close().await.unwrap();
        assert!(a.closed());

        // Second close is a no-op, not an error.
        a.close().await.unwrap();

        assert!(matches!(a.read().await, Err(CommError::Closed)));
        assert!(matches!(
            a.write(Bytes::from_static(b"x")).await,
            Err(CommError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_abort_closes_immediately() {
        let (mut a, _b) = pair();
        a.abort();
        assert!(a.closed());
        assert!(matches!(
            a.write(Bytes::from_static(b"x")).await,
            Err(CommError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_peer_close_flushes_queued_messages_first() {
        let (mut a, mut b) = pair();

        a.write(Bytes::from_static(b"one")).await.unwrap();
        a.write(Bytes::from_static(b"two")).await.unwrap();
        a.close().await.unwrap();

        // Messages written before the close still arrive, in order.
        assert_eq!(b.read().await.unwrap(), Bytes::from_static(b"one"));
        assert_eq!(b.read().await.unwrap(), Bytes::from_static(b"two"));

        // Then the close is observed.
        assert!(matches!(b.read().await, Err(CommError::Closed)));
        assert!(b.closed());
    }
}
