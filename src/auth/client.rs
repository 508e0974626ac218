//! Auth client: exchanges a username/password pair for an access token.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::ApiClient;

use super::error::AuthError;
use super::store::{Credential, CredentialStore};

/// OAuth2-style password grant form.
///
/// The server only evaluates `username` and `password`; the remaining fields
/// are sent empty but must be present in the form body.
#[derive(Serialize)]
struct TokenRequestForm<'a> {
    grant_type: &'a str,
    username: &'a str,
    password: &'a str,
    scope: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
}

/// Client for the auth endpoint; the only writer of the credential store.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    store: CredentialStore,
}

impl AuthClient {
    /// Creates an auth client over the injected API client and store.
    #[must_use]
    pub fn new(api: ApiClient, store: CredentialStore) -> Self {
        Self { api, store }
    }

    /// Exchanges the given credentials for an access token and stores it.
    ///
    /// Exactly one credential-store write happens per successful call;
    /// repeated successful logins overwrite the slots (last write wins). On
    /// every failure path the store is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] on transport failure,
    /// [`AuthError::Status`] on a non-2xx response,
    /// [`AuthError::MalformedResponse`] when a 2xx body lacks the token
    /// fields, and [`AuthError::Storage`] when the token cannot be persisted.
    #[instrument(skip_all, fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let url = self.api.url_for(&["auth", "token", ""]);
        let form = TokenRequestForm {
            grant_type: "",
            username,
            password,
            scope: "",
            client_id: "",
            client_secret: "",
        };

        let response = self
            .api
            .http()
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|error| AuthError::network("login", error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::status("login", status.as_u16()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|error| AuthError::malformed("login", error.to_string()))?;

        self.store
            .store_credential(&Credential::new(token.access_token, token.token_type))?;

        info!("login succeeded; credential stored");
        Ok(())
    }
}
