//! Encrypted at-rest persistence for credential slots.
//!
//! The session credential is sealed with ChaCha20-Poly1305 before it touches
//! disk. The encryption key comes from the OS keychain, with an environment
//! variable override (`SCHEDCAL_MASTER_KEY`) for headless environments; a
//! passphrase from the environment is stretched through SHA-256.
//!
//! File format: a random 12-byte nonce followed by the ciphertext of the
//! JSON-serialized slot map.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding a master-key passphrase.
///
/// When set (non-empty), it takes precedence over the OS keychain.
pub const MASTER_KEY_ENV_VAR: &str = "SCHEDCAL_MASTER_KEY";

const KEYRING_SERVICE: &str = "schedcal";
const KEYRING_ACCOUNT: &str = "credentials-at-rest";
const CREDENTIAL_FILE: &str = "credentials.enc";
const NONCE_LEN: usize = 12;

/// Errors from the credential storage layer.
///
/// Error text never contains slot values.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` resolved to a config directory.
    #[error("no user config directory could be resolved (set XDG_CONFIG_HOME or HOME)")]
    NoConfigDir,

    /// The encryption key could not be obtained from keychain or environment.
    #[error("master key unavailable: {reason}")]
    KeyUnavailable {
        /// Why the key could not be obtained.
        reason: String,
    },

    /// The persisted file is structurally invalid (truncated, not ours).
    #[error("persisted credential payload is invalid")]
    InvalidPayload,

    /// Decryption failed (wrong key or tampered ciphertext).
    #[error("persisted credentials could not be decrypted")]
    DecryptionFailed,

    /// Filesystem error reading or writing the credential file.
    #[error("credential storage IO error at {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn key_unavailable(reason: impl Into<String>) -> Self {
        Self::KeyUnavailable {
            reason: reason.into(),
        }
    }
}

/// Returns the default credential file path under the user config directory.
///
/// `$XDG_CONFIG_HOME/schedcal/credentials.enc`, falling back to
/// `$HOME/.config/schedcal/credentials.enc`.
///
/// # Errors
///
/// Returns [`StorageError::NoConfigDir`] when neither variable is set.
pub fn default_credential_path() -> Result<PathBuf, StorageError> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .ok_or(StorageError::NoConfigDir)?;

    Ok(config_home.join("schedcal").join(CREDENTIAL_FILE))
}

/// Loads the persisted slot map, or `None` when no file exists.
///
/// # Errors
///
/// Returns [`StorageError::InvalidPayload`] for a truncated or foreign file,
/// [`StorageError::DecryptionFailed`] when the ciphertext does not open under
/// the current key, and [`StorageError::Io`] / [`StorageError::KeyUnavailable`]
/// for the respective infrastructure failures.
pub fn load_slots(path: &Path) -> Result<Option<HashMap<String, String>>, StorageError> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(StorageError::io(path, error)),
    };

    let key = master_key()?;
    let plaintext = open_sealed(&key, &data)?;
    let slots: HashMap<String, String> =
        serde_json::from_slice(&plaintext).map_err(|_| StorageError::InvalidPayload)?;

    debug!(path = %path.display(), slots = slots.len(), "loaded persisted credential slots");
    Ok(Some(slots))
}

/// Seals and writes the slot map, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`StorageError::Io`] on filesystem failure and
/// [`StorageError::KeyUnavailable`] when no encryption key can be obtained.
pub fn store_slots(path: &Path, slots: &HashMap<String, String>) -> Result<(), StorageError> {
    let key = master_key()?;
    let plaintext = serde_json::to_vec(slots).map_err(|_| StorageError::InvalidPayload)?;
    let sealed = seal(&key, &plaintext);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| StorageError::io(parent, error))?;
    }
    std::fs::write(path, &sealed).map_err(|error| StorageError::io(path, error))?;
    restrict_permissions(path)?;

    debug!(path = %path.display(), slots = slots.len(), "persisted credential slots");
    Ok(())
}

/// Removes the persisted credential file; returns whether one existed.
///
/// # Errors
///
/// Returns [`StorageError::Io`] on filesystem failure other than the file
/// being absent.
pub fn clear_slots(path: &Path) -> Result<bool, StorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(StorageError::io(path, error)),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|error| StorageError::io(path, error))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

/// Seals plaintext under the key: `nonce || ciphertext`.
fn seal(key: &Key, plaintext: &[u8]) -> Vec<u8> {
    let cipher = ChaCha20Poly1305::new(key);
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    // Encryption with a fresh nonce over in-memory data cannot fail.
    let ciphertext = cipher.encrypt(&nonce, plaintext).unwrap_or_default();

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(nonce.as_slice());
    sealed.extend_from_slice(&ciphertext);
    sealed
}

/// Opens a sealed payload produced by [`seal`].
fn open_sealed(key: &Key, sealed: &[u8]) -> Result<Vec<u8>, StorageError> {
    if sealed.len() <= NONCE_LEN {
        return Err(StorageError::InvalidPayload);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(key);
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StorageError::DecryptionFailed)
}

/// Obtains the master key: env passphrase first, then the OS keychain.
///
/// A missing keychain entry is created with a freshly generated key, so the
/// first login on a machine provisions its own key material.
fn master_key() -> Result<Key, StorageError> {
    if let Some(passphrase) = std::env::var(MASTER_KEY_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        let digest = Sha256::digest(passphrase.as_bytes());
        return Ok(Key::clone_from_slice(digest.as_slice()));
    }

    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
        .map_err(|error| StorageError::key_unavailable(error.to_string()))?;

    match entry.get_password() {
        Ok(stored) => decode_hex(stored.trim())
            .filter(|bytes| bytes.len() == 32)
            .map(|bytes| Key::clone_from_slice(&bytes))
            .ok_or_else(|| StorageError::key_unavailable("stored keychain entry is malformed")),
        Err(keyring::Error::NoEntry) => {
            let key = ChaCha20Poly1305::generate_key(&mut OsRng);
            entry
                .set_password(&encode_hex(key.as_slice()))
                .map_err(|error| StorageError::key_unavailable(error.to_string()))?;
            debug!("provisioned new credential master key in keychain");
            Ok(key)
        }
        Err(error) => Err(StorageError::key_unavailable(error.to_string())),
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_key(seed: &str) -> Key {
        Key::clone_from_slice(Sha256::digest(seed.as_bytes()).as_slice())
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = test_key("roundtrip");
        let sealed = seal(&key, b"{\"access_token\":\"T\"}");
        let opened = open_sealed(&key, &sealed).unwrap();
        assert_eq!(opened, b"{\"access_token\":\"T\"}");
    }

    #[test]
    fn test_seal_uses_fresh_nonce_per_call() {
        let key = test_key("nonce");
        let a = seal(&key, b"same payload");
        let b = seal(&key, b"same payload");
        assert_ne!(a, b, "two seals of one payload must differ");
    }

    #[test]
    fn test_open_rejects_truncated_payload() {
        let key = test_key("truncated");
        let err = open_sealed(&key, b"short").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPayload));
    }

    #[test]
    fn test_open_rejects_wrong_key() {
        let sealed = seal(&test_key("right"), b"secret slots");
        let err = open_sealed(&test_key("wrong"), &sealed).unwrap_err();
        assert!(matches!(err, StorageError::DecryptionFailed));
        let msg = err.to_string();
        assert!(!msg.contains("secret"), "error must not leak plaintext: {msg}");
    }

    #[test]
    fn test_open_rejects_tampered_ciphertext() {
        let key = test_key("tamper");
        let mut sealed = seal(&key, b"payload");
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;
        assert!(matches!(
            open_sealed(&key, &sealed),
            Err(StorageError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_hex_roundtrip() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_hex(&encode_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_hex_rejects_odd_length_and_garbage() {
        assert_eq!(decode_hex("abc"), None);
        assert_eq!(decode_hex("zz"), None);
    }
}
