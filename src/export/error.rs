//! Error types for calendar export operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting a calendar.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Transport-level failure talking to the export endpoint.
    #[error("network error exporting from {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the export with a non-2xx status.
    #[error("HTTP {status} exporting from {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A 2xx response whose body does not match the expected shape.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse {
        /// The URL that responded.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// Filesystem error while materializing an artifact.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
