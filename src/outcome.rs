//! Uniform operation state for presentation layers.
//!
//! Pipeline operations return `Result` with typed errors; callers that need
//! to render progress (a CLI command, a UI view) fold those results into an
//! [`OperationOutcome`], which also models the in-flight state a `Result`
//! cannot express.

use std::fmt;

/// Discriminated state of a pipeline operation.
///
/// `Pending` is the initial state while a request is in flight; a resolved
/// operation is either `Success` with its payload or `Failure` with a
/// human-readable message the caller may render verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome<T> {
    /// The operation has been issued but has not resolved yet.
    Pending,
    /// The operation resolved with a payload.
    Success(T),
    /// The operation failed; the message is suitable for display.
    Failure(String),
}

impl<T> OperationOutcome<T> {
    /// Returns true for `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true for `Failure`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns true for `Pending`.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the success payload, if resolved successfully.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure message, if resolved with a failure.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for OperationOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}

impl<T> fmt::Display for OperationOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success(_) => write!(f, "success"),
            Self::Failure(message) => write!(f, "failure: {message}"),
        }
    }
}
