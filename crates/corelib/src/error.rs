//! Error types for the core library.

use std::time::Duration;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, CommError>;

/// Errors that can occur in the core library.
///
/// The taxonomy distinguishes errors by how the connect loop treats them:
/// `Transient` is swallowed and retried until the deadline; everything else
/// terminates the operation immediately.
#[derive(Debug, thiserror::Error)]
pub enum CommError {
    /// Malformed address URI (missing `://` separator or empty scheme).
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// Address scheme has no registered connector / listener factory.
    /// Raised immediately, never retried.
    #[error("unknown scheme {scheme:?} in address {address:?}")]
    UnknownScheme {
        scheme: String,
        address: String,
    },

    /// Deadline exceeded while retrying a connection attempt.
    ///
    /// Carries the address, the configured timeout and the last transient
    /// error observed (absent if the very first attempt ran out of time).
    #[error(
        "timed out trying to connect to {address:?} after {}s: {}",
        .timeout.as_secs_f64(),
        .last_error.as_deref().unwrap_or("connect() didn't finish in time")
    )]
    ConnectTimeout {
        address: String,
        timeout: Duration,
        last_error: Option<String>,
    },

    /// Connector-reported environment-class failure (e.g. connection
    /// refused). Recovered locally by the retry loop; only surfaced inside
    /// `ConnectTimeout` once the deadline is exceeded.
    #[error("transient connection failure: {0}")]
    Transient(String),

    /// Read/write/close attempted on a channel that is already closed or
    /// aborted.
    #[error("comm closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_timeout_message_includes_context() {
        let err = CommError::ConnectTimeout {
            address: "tcp://127.0.0.1:1234".to_string(),
            timeout: Duration::from_secs(3),
            last_error: Some("connection refused".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("tcp://127.0.0.1:1234"), "message: {}", msg);
        assert!(msg.contains("3s"), "message: {}", msg);
        assert!(msg.contains("connection refused"), "message: {}", msg);
    }

    #[test]
    fn test_connect_timeout_message_without_last_error() {
        // The very first attempt may run out of time before any transient
        // error is observed.
        let err = CommError::ConnectTimeout {
            address: "tcp://10.0.0.1:80".to_string(),
            timeout: Duration::from_millis(50),
            last_error: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("didn't finish in time"), "message: {}", msg);
    }
}
