//! Configuration management for FamilyConnect.
//!
//! Loads configuration from ${FAMCONNECT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Backend used to keep the username/password pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretBackend {
    /// JSON file under the home directory (default).
    #[default]
    File,
    /// OS keychain via the `keyring` crate.
    Keychain,
}

/// Sign-up validation switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Reject sign-up when confirmation differs from password.
    pub require_password_confirmation: bool,
    /// Reject sign-up with an empty username or password.
    pub reject_empty_fields: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_password_confirmation: true,
            reject_empty_fields: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `FAMCONNECT_LOG` is unset.
    pub level: String,
    /// Log to `<home>/logs/famconnect.log` instead of stderr.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for FamilyConnect data.
    //!
    //! FAMCONNECT_HOME resolution order:
    //! 1. FAMCONNECT_HOME environment variable (if set)
    //! 2. ~/.config/famconnect (default)

    use std::path::PathBuf;

    /// Returns the FamilyConnect home directory.
    pub fn famconnect_home() -> PathBuf {
        if let Ok(home) = std::env::var("FAMCONNECT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".famconnect"),
            |h| h.join(".config").join("famconnect"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        famconnect_home().join("config.toml")
    }

    /// Returns the path to the preferences file.
    pub fn prefs_path() -> PathBuf {
        famconnect_home().join("prefs.toml")
    }

    /// Returns the path to the file-backed secret store.
    pub fn secrets_path() -> PathBuf {
        famconnect_home().join("secrets.json")
    }

    /// Returns the log directory.
    pub fn logs_dir() -> PathBuf {
        famconnect_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where credentials are stored.
    pub secret_backend: SecretBackend,

    /// Keychain service name (keychain backend only).
    pub keychain_service: String,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    const DEFAULT_KEYCHAIN_SERVICE: &str = "famconnect";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        write_atomic(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with `Config::default()`. Comments come from the embedded
    /// template, values from the generated defaults.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_backend: SecretBackend::default(),
            keychain_service: Self::DEFAULT_KEYCHAIN_SERVICE.to_string(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Writes content to a file, creating parent directories as needed.
/// Uses temp file + rename so readers never observe a partial write.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
