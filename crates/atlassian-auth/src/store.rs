//! Token persistence: OS keyring first, JSON file second
//!
//! Each OAuth client id owns one record. Saves go to the keyring under
//! `"oauth-" + client_id`; if the keyring refuses (no backend, locked,
//! permission denied) the record is written to
//! `~/.atlassian-oauth/oauth-<client_id>.json` instead. Loads try the keyring
//! and fall through to the file when the keyring has nothing or errors.
//!
//! The fallback boundary is the [`SecretVault`] trait: a vault returns a
//! structured `Result`, and only an `Err` from the primary sends the store to
//! the secondary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::{KEYRING_SERVICE_NAME, TOKEN_DIR_NAME};
use crate::error::{Error, Result};

/// Durable projection of an [`OAuthCredential`](crate::OAuthCredential).
///
/// Every field is optional so partially written records (older versions,
/// hand-edited files) still load. Client secret and scope are never stored;
/// they come from the environment on each start.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredTokens {
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    /// Expiration as unix timestamp in seconds
    pub expires_at: Option<u64>,
    pub cloud_id: Option<String>,
}

impl StoredTokens {
    pub fn is_empty(&self) -> bool {
        self.refresh_token.is_none()
            && self.access_token.is_none()
            && self.expires_at.is_none()
            && self.cloud_id.is_none()
    }
}

impl fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("StoredTokens")
            .field("refresh_token", &redact(&self.refresh_token))
            .field("access_token", &redact(&self.access_token))
            .field("expires_at", &self.expires_at)
            .field("cloud_id", &self.cloud_id)
            .finish()
    }
}

/// A password-style secret store addressed by (service, username).
///
/// `get_password` distinguishes "no entry" (`Ok(None)`) from "store
/// unavailable" (`Err`).
pub trait SecretVault: Send + Sync {
    fn set_password(&self, service: &str, username: &str, payload: &str) -> Result<()>;
    fn get_password(&self, service: &str, username: &str) -> Result<Option<String>>;
}

/// The platform keyring (macOS Keychain, Windows Credential Manager, Secret
/// Service on Linux). Calls block; [`CredentialStore`] runs them on the
/// blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringVault;

impl SecretVault for KeyringVault {
    fn set_password(&self, service: &str, username: &str, payload: &str) -> Result<()> {
        keyring::Entry::new(service, username)
            .and_then(|entry| entry.set_password(payload))
            .map_err(|e| Error::Vault(e.to_string()))
    }

    fn get_password(&self, service: &str, username: &str) -> Result<Option<String>> {
        let entry =
            keyring::Entry::new(service, username).map_err(|e| Error::Vault(e.to_string()))?;
        match entry.get_password() {
            Ok(payload) => Ok(Some(payload)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::Vault(e.to_string())),
        }
    }
}

/// One JSON file per client id in a fixed directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// `~/.atlassian-oauth`, or a relative `.atlassian-oauth` when the home
    /// directory cannot be determined.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(TOKEN_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(TOKEN_DIR_NAME))
    }

    pub fn path_for(&self, client_id: &str) -> PathBuf {
        self.dir.join(format!("oauth-{client_id}.json"))
    }

    /// Overwrite the record for `client_id`, creating the directory if needed.
    pub async fn save(&self, client_id: &str, record: &StoredTokens) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Io(format!("creating token directory: {e}")))?;
        write_atomic(&self.path_for(client_id), record).await
    }

    /// Read the record for `client_id`; a missing file is `Ok(None)`.
    pub async fn load(&self, client_id: &str) -> Result<Option<StoredTokens>> {
        let path = self.path_for(client_id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(format!("reading token file: {e}"))),
        };
        let record = serde_json::from_str(&contents)
            .map_err(|e| Error::CredentialParse(format!("parsing token file: {e}")))?;
        debug!(path = %path.display(), "loaded tokens from file");
        Ok(Some(record))
    }
}

/// Keyring-with-file-fallback token store.
#[derive(Clone)]
pub struct CredentialStore {
    vault: Arc<dyn SecretVault>,
    files: FileTokenStore,
}

impl CredentialStore {
    pub fn new(vault: Arc<dyn SecretVault>, files: FileTokenStore) -> Self {
        Self { vault, files }
    }

    pub fn files(&self) -> &FileTokenStore {
        &self.files
    }

    /// Keyring username for a client id.
    pub fn keyring_username(client_id: &str) -> String {
        format!("oauth-{client_id}")
    }

    /// Persist `record`, preferring the keyring.
    ///
    /// Only a keyring failure triggers the file write. The returned error is
    /// the file backend's; callers log it rather than fail the operation that
    /// produced the tokens.
    pub async fn save(&self, client_id: &str, record: &StoredTokens) -> Result<()> {
        let payload = serde_json::to_string(record)
            .map_err(|e| Error::CredentialParse(format!("serializing tokens: {e}")))?;
        let username = Self::keyring_username(client_id);
        let vault = Arc::clone(&self.vault);
        let stored = tokio::task::spawn_blocking(move || {
            vault.set_password(KEYRING_SERVICE_NAME, &username, &payload)
        })
        .await
        .map_err(|e| Error::Vault(format!("keyring task failed: {e}")))
        .and_then(|result| result);

        match stored {
            Ok(()) => {
                debug!(client_id, "saved tokens to keyring");
                Ok(())
            }
            Err(e) => {
                warn!(client_id, error = %e, "keyring unavailable, falling back to file storage");
                self.files.save(client_id, record).await?;
                info!(
                    client_id,
                    path = %self.files.path_for(client_id).display(),
                    "saved tokens to file"
                );
                Ok(())
            }
        }
    }

    /// Load the record for `client_id` from whichever backend has one.
    ///
    /// Never fails: an unreadable keyring and an unreadable file both degrade
    /// to `None`, which callers treat as a first run.
    pub async fn load(&self, client_id: &str) -> Option<StoredTokens> {
        let username = Self::keyring_username(client_id);
        let vault = Arc::clone(&self.vault);
        let fetched = tokio::task::spawn_blocking(move || {
            vault.get_password(KEYRING_SERVICE_NAME, &username)
        })
        .await
        .map_err(|e| Error::Vault(format!("keyring task failed: {e}")))
        .and_then(|result| result);

        match fetched {
            Ok(Some(payload)) => match serde_json::from_str::<StoredTokens>(&payload) {
                Ok(record) => {
                    debug!(client_id, "loaded tokens from keyring");
                    return Some(record);
                }
                Err(e) => {
                    warn!(
                        client_id,
                        error = %e,
                        "keyring entry is not a token record, trying file"
                    );
                }
            },
            Ok(None) => debug!(client_id, "no keyring entry, trying file"),
            Err(e) => warn!(client_id, error = %e, "keyring read failed, trying file"),
        }

        match self.files.load(client_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(client_id, error = %e, "failed to load tokens from file");
                None
            }
        }
    }
}

/// Write a token record atomically.
///
/// Writes to a temporary file in the same directory, then renames it over
/// the target, so a crash never leaves a truncated record. The temp name is
/// derived from the target name, so concurrent saves for different client ids
/// never share one. Sets file permissions to 0600 since the file contains
/// OAuth tokens.
async fn write_atomic(path: &Path, record: &StoredTokens) -> Result<()> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| Error::CredentialParse(format!("serializing tokens: {e}")))?;

    let dir = path
        .parent()
        .ok_or_else(|| Error::Io("token path has no parent directory".into()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Io("token path has no file name".into()))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{file_name}.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::Io(format!("writing temp token file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&tmp_path, perms)
            .await
            .map_err(|e| Error::Io(format!("setting token file permissions: {e}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::Io(format!("renaming temp token file: {e}")))?;

    debug!(path = %path.display(), "persisted tokens");
    Ok(())
}
