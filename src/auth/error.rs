//! Error types for authentication operations.

use thiserror::Error;

use super::storage::StorageError;

/// Errors that can occur during login and session probing.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network error during {operation}: {source}")]
    Network {
        /// The operation that failed (`login`, `profile`).
        operation: &'static str,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the request with a non-2xx status.
    #[error("HTTP {status} during {operation}")]
    Status {
        /// The operation that failed.
        operation: &'static str,
        /// The HTTP status code.
        status: u16,
    },

    /// A 2xx response whose body does not match the expected shape.
    #[error("malformed {operation} response: {reason}")]
    MalformedResponse {
        /// The operation that failed.
        operation: &'static str,
        /// What was wrong with the body.
        reason: String,
    },

    /// No stored access token; the operation requires a prior login.
    #[error("not authenticated: no stored access token\n  Suggestion: run `schedcal login` first")]
    NotAuthenticated,

    /// The credential could not be persisted after a successful login.
    #[error("failed to persist credential: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Creates a network error for an operation.
    pub fn network(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Network { operation, source }
    }

    /// Creates a non-2xx status error for an operation.
    #[must_use]
    pub fn status(operation: &'static str, status: u16) -> Self {
        Self::Status { operation, status }
    }

    /// Creates a malformed-response error for an operation.
    #[must_use]
    pub fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }
}
