//! Shared HTTP client construction and endpoint configuration.
//!
//! This module centralizes networking defaults so every pipeline component
//! (login, session probe, export) stays consistent on timeout, user-agent,
//! and compression. The [`ApiClient`] value is constructed once at startup
//! and injected into each component; nothing in the pipeline reaches for an
//! ambient global endpoint.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Default Schedulizer endpoint (the development server address).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/";

/// Environment variable consulted when no endpoint flag is given.
pub const ENDPOINT_ENV_VAR: &str = "SCHEDCAL_ENDPOINT";

/// HTTP connect timeout (10 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP read timeout (60 seconds; calendar generation can be slow server-side).
const READ_TIMEOUT_SECS: u64 = 60;

/// Default User-Agent identifying the tool.
fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("schedcal/{version} (course-schedule-export)")
}

/// Errors that can occur while constructing the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint '{endpoint}': {reason}\n  Suggestion: use an http:// or https:// URL with a host (e.g. http://localhost:8000/)")]
    InvalidEndpoint {
        /// The endpoint string that failed validation.
        endpoint: String,
        /// Why the endpoint is unusable.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    fn invalid_endpoint(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}

/// HTTP client for the Schedulizer API, carrying the base endpoint URL.
///
/// Cloneable and cheap to share; the inner `reqwest::Client` pools
/// connections across all pipeline operations.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    /// Creates an API client for the given endpoint.
    ///
    /// The endpoint must be an absolute http(s) URL with a host; a trailing
    /// slash is added when missing so relative joins behave predictably.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] when the endpoint cannot be
    /// parsed or uses an unsupported scheme, and [`ApiError::ClientBuild`]
    /// when the HTTP client cannot be constructed.
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(endpoint)
            .map_err(|error| ApiError::invalid_endpoint(endpoint, error.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::invalid_endpoint(
                endpoint,
                format!("scheme '{}' is not supported", url.scheme()),
            ));
        }
        if url.host_str().is_none() {
            return Err(ApiError::invalid_endpoint(endpoint, "URL has no host"));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(default_user_agent())
            .gzip(true)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self { client, endpoint: url })
    }

    /// Creates an API client from `SCHEDCAL_ENDPOINT` or the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ApiClient::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self::new(&endpoint)
    }

    /// Returns the configured base endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds an absolute URL from path segments under the base endpoint.
    ///
    /// Segments are percent-encoded individually, so user-supplied values
    /// (like a semester config id) cannot inject extra path components. A
    /// trailing empty segment produces a trailing slash.
    #[must_use]
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // Only cannot-be-a-base URLs lack path segments; the constructor
        // guarantees an http(s) URL with a host.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Returns the shared HTTP client.
    #[must_use]
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}
