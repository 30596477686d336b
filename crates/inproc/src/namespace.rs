//! Process-wide namespace mapping in-proc locations to live listeners.
//!
//! A started listener claims its location here and hangs an accept queue off
//! it; a connector dials by pushing the server half of a fresh comm pair
//! into that queue. A missing entry is reported as a transient "connection
//! refused", which is what lets the core connect loop retry while a listener
//! is still starting up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use corelib::error::{CommError, Result};

use crate::comm::InProcComm;

pub(crate) static NAMESPACE: Lazy<Namespace> = Lazy::new(Namespace::new);

struct Entry {
    accept: mpsc::UnboundedSender<InProcComm>,
    /// The listener-side deserialize flag, applied to accepted comms.
    deserialize: bool,
}

pub(crate) struct Namespace {
    entries: Mutex<HashMap<String, Entry>>,
    next_listener: AtomicU64,
    next_client: AtomicU64,
}

impl Namespace {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
            next_client: AtomicU64::new(1),
        }
    }

    /// Pick a fresh location for a wildcard (empty-location) bind.
    pub(crate) fn assign_location(&self) -> String {
        format!("listener-{}", self.next_listener.fetch_add(1, Ordering::Relaxed))
    }

    /// Claim `location` and return the queue of accepted comms.
    pub(crate) fn claim(
        &self,
        location: &str,
        deserialize: bool,
    ) -> Result<mpsc::UnboundedReceiver<InProcComm>> {
        let mut entries = self.entries.lock();
        if entries.contains_key(location) {
            return Err(CommError::InvalidAddress(format!(
                "inproc location {:?} is already in use",
                location
            )));
        }
        let (accept, accepted) = mpsc::unbounded_channel();
        entries.insert(
            location.to_string(),
            Entry {
                accept,
                deserialize,
            },
        );
        Ok(accepted)
    }

    /// Release `location`. Dials after this point are refused.
    pub(crate) fn release(&self, location: &str) {
        self.entries.lock().remove(location);
    }

    /// Dial `location`: build a comm pair, hand the server half to the
    /// listener, return the client half.
    pub(crate) fn dial(&self, location: &str, deserialize: bool) -> Result<InProcComm> {
        let entries = self.entries.lock();
        let entry = entries.get(location).ok_or_else(|| {
            CommError::Transient(format!(
                "connection refused: no inproc listener at {:?}",
                location
            ))
        })?;

        let client_address = format!(
            "inproc://client-{}",
            self.next_client.fetch_add(1, Ordering::Relaxed)
        );
        let listener_address = format!("inproc://{}", location);
        let (client, server) = InProcComm::pair(
            (client_address, deserialize),
            (listener_address, entry.deserialize),
        );

        // The listener may be tearing down between lookup and delivery;
        // that is the same refusal as not being bound at all.
        entry.accept.send(server).map_err(|_| {
            CommError::Transient(format!(
                "connection refused: inproc listener at {:?} is shutting down",
                location
            ))
        })?;
        Ok(client)
    }
}
