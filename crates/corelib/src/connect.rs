//! The deadline-bounded connect algorithm.
//!
//! `connect` resolves the address scheme in the registry and retries the
//! transport's connector until it succeeds or the caller's time budget runs
//! out. Two rules shape the loop:
//!
//! 1. **Each attempt gets the *remaining* budget, not a fresh one.** The
//!    per-attempt bound shrinks as the deadline approaches, so the loop
//!    never overruns the caller's total timeout by more than one retry
//!    interval.
//! 2. **Only transient failures are retried.** A connector reporting
//!    [`CommError::Transient`] (peer not listening yet, connection refused)
//!    triggers a short fixed sleep and another attempt; every other error
//!    propagates immediately.
//!
//! No exponential backoff is applied between attempts; the fixed short
//! interval favors low latency to first success over reducing load on a
//! struggling peer. Callers that want a different policy set
//! [`ConnectOptions::retry_interval`].
//!
//! [`CommError::Transient`]: crate::error::CommError::Transient

use std::time::Duration;

use tokio::time::{sleep, timeout_at, Instant};

use crate::address::parse_address;
use crate::comm::Comm;
use crate::error::{CommError, Result};
use crate::registry::Registry;

/// Default total time budget for [`connect`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Fixed interval slept between retry attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Options controlling a [`connect`] call.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Total time budget for the whole retry loop.
    pub timeout: Duration,
    /// Interval slept between attempts after a transient failure.
    pub retry_interval: Duration,
    /// Forwarded to the connector; opaque to the connect algorithm.
    pub deserialize: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            deserialize: true,
        }
    }
}

impl ConnectOptions {
    /// Options with the given total timeout and defaults otherwise.
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Connect to `addr` (a URI such as `tcp://127.0.0.1:1234`) through the
/// process-wide registry and return a [`Comm`].
///
/// Failed attempts are retried until `options.timeout` expires. See
/// [`connect_with`] for the full contract.
pub async fn connect(addr: &str, options: ConnectOptions) -> Result<Box<dyn Comm>> {
    connect_with(Registry::global(), addr, options).await
}

/// Connect to `addr` through an explicit registry.
///
/// # Errors
///
/// - [`CommError::InvalidAddress`] if `addr` is not `scheme://location`.
/// - [`CommError::UnknownScheme`] if the scheme has no registered
///   connector; raised immediately, with no attempt and no sleep.
/// - [`CommError::ConnectTimeout`] once the deadline passes, carrying the
///   address, the configured timeout, and the last transient error observed.
/// - Any non-transient connector error, unchanged.
pub async fn connect_with(
    registry: &Registry,
    addr: &str,
    options: ConnectOptions,
) -> Result<Box<dyn Comm>> {
    let address = parse_address(addr)?;
    let connector =
        registry
            .connector(&address.scheme)
            .ok_or_else(|| CommError::UnknownScheme {
                scheme: address.scheme.clone(),
                address: addr.to_string(),
            })?;

    let deadline = Instant::now() + options.timeout;
    let mut last_error: Option<String> = None;

    let timed_out = |last_error: Option<String>| CommError::ConnectTimeout {
        address: addr.to_string(),
        timeout: options.timeout,
        last_error,
    };

    loop {
        // Bound the attempt by the time left until the deadline, not by the
        // original timeout: retries get a shrinking budget.
        let attempt = timeout_at(deadline, connector.connect(&address.location, options.deserialize));
        match attempt.await {
            Ok(Ok(comm)) => {
                tracing::debug!(address = %addr, peer = %comm.peer_address(), "connected");
                return Ok(comm);
            }
            Ok(Err(CommError::Transient(reason))) => {
                tracing::debug!(address = %addr, %reason, "transient connect failure");
                last_error = Some(reason);
                if Instant::now() < deadline {
                    tracing::debug!("sleeping on connect");
                    sleep(options.retry_interval).await;
                } else {
                    return Err(timed_out(last_error));
                }
            }
            Ok(Err(other)) => return Err(other),
            // The attempt itself ran into the deadline. `last_error` is
            // empty if this was the very first attempt.
            Err(_elapsed) => return Err(timed_out(last_error)),
        }
    }
}
