//! Authentication and credential management.
//!
//! This module provides the login flow against the remote auth endpoint, the
//! credential slot store with encrypted at-rest persistence, and the session
//! probe that verifies a stored token is still usable.

mod client;
mod error;
mod profile;
mod storage;
mod store;

pub use client::AuthClient;
pub use error::AuthError;
pub use profile::SessionProbe;
pub use storage::{MASTER_KEY_ENV_VAR, StorageError, default_credential_path};
pub use store::{ACCESS_TOKEN_SLOT, Credential, CredentialStore, TOKEN_TYPE_SLOT};
