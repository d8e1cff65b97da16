//! Secret storage for the single username/password pair.
//!
//! The file backend stores the pair in `<home>/secrets.json` with restricted
//! permissions (0600). Secrets are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Config, SecretBackend, paths};

/// Fixed key for the stored username.
pub const USERNAME_KEY: &str = "appUsernameKey";

/// Fixed key for the stored password.
pub const PASSWORD_KEY: &str = "appPasswordKey";

/// A username/password pair as entered by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Whatever the store currently holds. `None` means never set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StoredCredentials {
    /// True when both halves of the pair are present.
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Exact, case-sensitive comparison against both stored values.
    ///
    /// Absent values never match, including an empty submission.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username.as_deref() == Some(username) && self.password.as_deref() == Some(password)
    }
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Capability interface over a secret-storage facility.
///
/// Exactly one pair exists at a time; `store` overwrites both values.
pub trait SecretStore: Send + Sync {
    /// Writes both values under the fixed keys.
    ///
    /// # Errors
    /// Returns an error if the facility rejects the write.
    fn store(&self, credentials: &Credentials) -> Result<()>;

    /// Reads the current values.
    ///
    /// # Errors
    /// Returns an error if the facility is unavailable. A missing entry is
    /// not an error.
    fn retrieve(&self) -> Result<StoredCredentials>;

    /// Short backend label for status output.
    fn describe(&self) -> String;

    /// Time of the last successful `store`, when the backend records one.
    ///
    /// # Errors
    /// Returns an error if the facility is unavailable.
    fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

/// Builds the secret store selected in config.
///
/// # Errors
/// Returns an error if the keychain backend is selected in a build without
/// the `keychain` feature.
pub fn open_store(config: &Config) -> Result<Box<dyn SecretStore>> {
    match config.secret_backend {
        SecretBackend::File => Ok(Box::new(FileSecretStore::open_default())),
        SecretBackend::Keychain => open_keychain(&config.keychain_service),
    }
}

#[cfg(feature = "keychain")]
fn open_keychain(service: &str) -> Result<Box<dyn SecretStore>> {
    Ok(Box::new(keychain::KeychainSecretStore::new(service)))
}

#[cfg(not(feature = "keychain"))]
fn open_keychain(_service: &str) -> Result<Box<dyn SecretStore>> {
    anyhow::bail!(
        "secret_backend = \"keychain\" requires a build with the `keychain` feature; \
         use secret_backend = \"file\" instead"
    )
}

/// Display stand-in for a stored secret. Reveals neither content nor length.
pub const SECRET_MASK: &str = "********";

/// On-disk layout of `secrets.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretFile {
    #[serde(rename = "appUsernameKey", skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(rename = "appPasswordKey", skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Secrets kept in a JSON file with owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Store at the default location (`<home>/secrets.json`).
    pub fn open_default() -> Self {
        Self::new(paths::secrets_path())
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SecretFile> {
        if !self.path.exists() {
            return Ok(SecretFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read secrets from {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse secrets from {}", self.path.display()))
    }

    /// Writes `<name>.tmp` with owner-only permissions, then renames it
    /// over the target so readers never see a partial or wider-mode file.
    fn save(&self, file: &SecretFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(file).context("Failed to serialize secrets")?;
        let tmp_path = self.tmp_path();

        // A leftover temp file may carry other permissions; mode only applies on create.
        let _ = fs::remove_file(&tmp_path);

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut out = options
            .open(&tmp_path)
            .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
        out.write_all(contents.as_bytes())
            .and_then(|()| out.sync_all())
            .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        drop(out);

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SecretStore for FileSecretStore {
    fn store(&self, credentials: &Credentials) -> Result<()> {
        let file = SecretFile {
            username: Some(credentials.username.clone()),
            password: Some(credentials.password.clone()),
            updated_at: Some(Utc::now()),
        };
        self.save(&file)
    }

    fn retrieve(&self) -> Result<StoredCredentials> {
        let file = self.load()?;
        Ok(StoredCredentials {
            username: file.username,
            password: file.password,
        })
    }

    fn describe(&self) -> String {
        format!("file ({})", self.path.display())
    }

    fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.load()?.updated_at)
    }
}

/// In-process secret store.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    inner: Mutex<StoredCredentials>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn store(&self, credentials: &Credentials) -> Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| anyhow::anyhow!("secret store lock poisoned: {e}"))?;
        *inner = StoredCredentials {
            username: Some(credentials.username.clone()),
            password: Some(credentials.password.clone()),
        };
        Ok(())
    }

    fn retrieve(&self) -> Result<StoredCredentials> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| anyhow::anyhow!("secret store lock poisoned: {e}"))?;
        Ok(inner.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(feature = "keychain")]
pub mod keychain {
    //! OS keychain backend (macOS Keychain, Windows Credential Manager,
    //! Secret Service on Linux).

    use anyhow::{Context, Result};
    use keyring::Entry;

    use super::{Credentials, PASSWORD_KEY, SecretStore, StoredCredentials, USERNAME_KEY};

    /// One keychain entry per fixed key under a shared service name.
    #[derive(Debug, Clone)]
    pub struct KeychainSecretStore {
        service: String,
    }

    impl KeychainSecretStore {
        pub fn new(service: impl Into<String>) -> Self {
            Self {
                service: service.into(),
            }
        }

        fn entry(&self, key: &str) -> Result<Entry> {
            Entry::new(&self.service, key).context("failed to create keyring entry")
        }

        fn get(&self, key: &str) -> Result<Option<String>> {
            match self.entry(key)?.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(anyhow::anyhow!(e))
                    .with_context(|| format!("failed to read '{key}' from keychain")),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entry(key)?
                .set_password(value)
                .with_context(|| format!("failed to store '{key}' in keychain"))
        }

        fn delete(&self, key: &str) -> Result<()> {
            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(anyhow::anyhow!(e))
                    .with_context(|| format!("failed to delete '{key}' from keychain")),
            }
        }
    }

    /// Keychain entries are written one at a time. When the password write
    /// fails the username entry is put back to `previous_username` (or
    /// removed if there was none), so the pair is never left mixed.
    fn write_pair(
        previous_username: Option<&str>,
        credentials: &Credentials,
        mut set: impl FnMut(&str, &str) -> Result<()>,
        mut delete: impl FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        set(USERNAME_KEY, &credentials.username)?;

        let Err(e) = set(PASSWORD_KEY, &credentials.password) else {
            return Ok(());
        };
        let rollback = match previous_username {
            Some(username) => set(USERNAME_KEY, username),
            None => delete(USERNAME_KEY),
        };
        if let Err(rollback) = rollback {
            tracing::warn!(
                event = "secrets.keychain_rollback_failed",
                error = %format!("{rollback:#}"),
            );
        }
        Err(e)
    }

    impl SecretStore for KeychainSecretStore {
        fn store(&self, credentials: &Credentials) -> Result<()> {
            let previous = self.get(USERNAME_KEY).ok().flatten();
            write_pair(
                previous.as_deref(),
                credentials,
                |key, value| self.set(key, value),
                |key| self.delete(key),
            )
        }

        fn retrieve(&self) -> Result<StoredCredentials> {
            Ok(StoredCredentials {
                username: self.get(USERNAME_KEY)?,
                password: self.get(PASSWORD_KEY)?,
            })
        }

        fn describe(&self) -> String {
            format!("keychain (service: {})", self.service)
        }
    }

}
