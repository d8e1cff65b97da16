//! Persisted boolean preferences.
//!
//! Two flags live here: the "stay logged in" choice and the first-launch
//! gate. The file backend keeps them in `<home>/prefs.toml` and edits the
//! document in place so hand-written comments survive.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::config::{paths, write_atomic};

/// Key for the persisted "stay logged in" preference.
pub const STAY_LOGGED_IN_KEY: &str = "stayLoggedIn";

/// Key for the first-launch flag.
pub const WELCOME_SCREEN_SHOWN_KEY: &str = "welcomeScreenShown";

/// Key/boolean preference storage.
///
/// Absent keys read as `None`; callers pick their own default.
pub trait PreferenceStore: Send + Sync {
    /// Reads a flag.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    /// Writes a flag, persisting it before returning.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set_bool(&self, key: &str, value: bool) -> Result<()>;
}

/// Preferences stored as a flat TOML table on disk.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Preferences at the default location (`<home>/prefs.toml`).
    pub fn open_default() -> Self {
        Self::new(paths::prefs_path())
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<toml_edit::DocumentMut> {
        if !self.path.exists() {
            return Ok(toml_edit::DocumentMut::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences from {}", self.path.display()))?;
        contents
            .parse()
            .with_context(|| format!("Failed to parse preferences from {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let doc = self.read_document()?;
        Ok(doc.get(key).and_then(toml_edit::Item::as_bool))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut doc = self.read_document()?;
        doc[key] = toml_edit::value(value);
        write_atomic(&self.path, &doc.to_string())
    }
}

/// In-process preferences, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, bool>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let values = self
            .values
            .lock()
            .map_err(|e| anyhow::anyhow!("preference store lock poisoned: {e}"))?;
        Ok(values.get(key).copied())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| anyhow::anyhow!("preference store lock poisoned: {e}"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
