//! Typed credential slot store.
//!
//! The store exposes named string slots (`get`/`set`) plus typed helpers for
//! the session credential. Only the auth client writes; the session probe and
//! export client read. Slots survive process restarts through the encrypted
//! storage layer when the store is opened against a path.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::storage::{self, StorageError};

/// Slot name for the access token.
pub const ACCESS_TOKEN_SLOT: &str = "access_token";

/// Slot name for the token type (e.g. `bearer`).
pub const TOKEN_TYPE_SLOT: &str = "token_type";

/// A session credential as returned by the auth endpoint.
///
/// The token value is intentionally redacted in Debug output to prevent
/// accidental logging of a live credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Token type presented alongside the token (e.g. `bearer`).
    pub token_type: String,
    /// The access token (sensitive, never log).
    access_token: String,
}

impl Credential {
    /// Creates a credential.
    #[must_use]
    pub fn new(access_token: String, token_type: String) -> Self {
        Self {
            token_type,
            access_token,
        }
    }

    /// Returns the access token.
    ///
    /// Token values are sensitive; avoid logging the return value.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

// Custom Debug impl that redacts the token value.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Persistent key/value store for small session data.
///
/// Cloneable; clones share the same slots. Writes are last-write-wins: two
/// racing logins may interleave at the slot level, which is acceptable
/// because writes are rare and user-triggered. One `store_credential` call
/// persists both slots in a single write, so the on-disk pair is always from
/// one login.
#[derive(Clone)]
pub struct CredentialStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
    persist_path: Option<PathBuf>,
}

impl CredentialStore {
    /// Creates an ephemeral store with no persistence (tests, one-shot runs).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            persist_path: None,
        }
    }

    /// Opens a store backed by the given credential file.
    ///
    /// A missing file starts an empty store. A file that fails to load
    /// (corrupt payload, unavailable key) also starts empty, with a warning:
    /// a broken credential file must never brick the client; the user can
    /// simply log in again.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = match storage::load_slots(&path) {
            Ok(Some(slots)) => slots,
            Ok(None) => HashMap::new(),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to load persisted credentials; starting with an empty store"
                );
                HashMap::new()
            }
        };

        Self {
            slots: Arc::new(RwLock::new(slots)),
            persist_path: Some(path),
        }
    }

    /// Opens a store at the default credential path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoConfigDir`] when no config directory can be
    /// resolved.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::open(storage::default_credential_path()?))
    }

    /// Returns the stored value for a named slot, or `None` if unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.read_slots().get(name).cloned()
    }

    /// Stores a string value under a named slot, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing file cannot be written; the
    /// in-memory slot is updated regardless.
    pub fn set(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.write_slots();
        slots.insert(name.to_string(), value.to_string());
        self.persist(&slots)
    }

    /// Returns the session credential when both slots are present.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        let slots = self.read_slots();
        let access_token = slots.get(ACCESS_TOKEN_SLOT)?.clone();
        let token_type = slots.get(TOKEN_TYPE_SLOT)?.clone();
        Some(Credential::new(access_token, token_type))
    }

    /// Stores both credential slots as a single persisted write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing file cannot be written.
    pub fn store_credential(&self, credential: &Credential) -> Result<(), StorageError> {
        let mut slots = self.write_slots();
        slots.insert(
            ACCESS_TOKEN_SLOT.to_string(),
            credential.access_token.clone(),
        );
        slots.insert(TOKEN_TYPE_SLOT.to_string(), credential.token_type.clone());
        debug!(token_type = %credential.token_type, "stored session credential");
        self.persist(&slots)
    }

    /// Clears all slots and removes the backing file; returns whether a
    /// persisted file existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing file cannot be removed.
    pub fn clear(&self) -> Result<bool, StorageError> {
        self.write_slots().clear();
        match &self.persist_path {
            Some(path) => storage::clear_slots(path),
            None => Ok(false),
        }
    }

    /// Returns the backing file path, when the store is persistent.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.persist_path.as_deref()
    }

    fn persist(&self, slots: &HashMap<String, String>) -> Result<(), StorageError> {
        match &self.persist_path {
            Some(path) => storage::store_slots(path, slots),
            None => Ok(()),
        }
    }

    fn read_slots(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.slots
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_slots(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.slots
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("slots", &self.read_slots().len())
            .field("persist_path", &self.persist_path)
            .finish()
    }
}
