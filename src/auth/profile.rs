//! Session probe: verifies the stored credential against the profile endpoint.

use tracing::{debug, instrument};

use crate::api::ApiClient;

use super::error::AuthError;
use super::store::{ACCESS_TOKEN_SLOT, CredentialStore};

/// Read-only probe that checks whether the stored credential is usable.
#[derive(Debug, Clone)]
pub struct SessionProbe {
    api: ApiClient,
    store: CredentialStore,
}

impl SessionProbe {
    /// Creates a session probe over the injected API client and store.
    #[must_use]
    pub fn new(api: ApiClient, store: CredentialStore) -> Self {
        Self { api, store }
    }

    /// Fetches the profile for the stored access token.
    ///
    /// With no stored token this fails immediately; no network call is made.
    /// The probe has no side effects beyond the request itself; it never
    /// mutates the credential store, even when the token is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no token is stored,
    /// [`AuthError::Network`] on transport failure, [`AuthError::Status`] on
    /// a non-2xx response, and [`AuthError::MalformedResponse`] when the body
    /// is not JSON.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<serde_json::Value, AuthError> {
        let Some(token) = self.store.get(ACCESS_TOKEN_SLOT) else {
            debug!("no stored access token; skipping profile request");
            return Err(AuthError::NotAuthenticated);
        };

        let url = self.api.url_for(&["profile", ""]);
        let response = self
            .api
            .http()
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|error| AuthError::network("profile", error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::status("profile", status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|error| AuthError::malformed("profile", error.to_string()))
    }
}
