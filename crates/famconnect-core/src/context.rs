//! Application context: the stores, session and auth service for one process.
//!
//! Built once at startup and handed to whichever surface (TUI, CLI command)
//! needs session visibility.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::{AuthPolicy, AuthService, LoginOutcome, SignUpForm};
use crate::config::Config;
use crate::prefs::{FilePreferences, PreferenceStore};
use crate::secrets::{self, SecretStore};
use crate::session::SessionState;
use crate::shell::{Route, first_launch};

pub struct AppContext {
    pub config: Config,
    pub prefs: Arc<dyn PreferenceStore>,
    pub session: SessionState,
    pub auth: AuthService,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Opens the on-disk stores under the home directory.
    ///
    /// # Errors
    /// Returns an error if the secret backend cannot be opened or the
    /// preferences cannot be read.
    pub fn open(config: Config) -> Result<Self> {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(FilePreferences::open_default());
        let secrets: Arc<dyn SecretStore> =
            Arc::from(secrets::open_store(&config).context("open secret store")?);
        Self::with_stores(config, prefs, secrets)
    }

    /// Builds a context over caller-supplied stores.
    ///
    /// # Errors
    /// Returns an error if the preferences cannot be read.
    pub fn with_stores(
        config: Config,
        prefs: Arc<dyn PreferenceStore>,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Self> {
        let session = SessionState::restore(Arc::clone(&prefs)).context("restore session")?;
        let auth = AuthService::new(secrets, AuthPolicy::from(&config.auth));
        Ok(Self {
            config,
            prefs,
            session,
            auth,
        })
    }

    /// Screen to show at startup.
    ///
    /// # Errors
    /// Returns an error if the preferences cannot be read.
    pub fn initial_route(&self) -> Result<Route> {
        let welcome_shown = first_launch::welcome_shown(self.prefs.as_ref())?;
        Ok(Route::resolve(welcome_shown, self.session.logged_in()))
    }

    /// # Errors
    /// Returns an error if the preferences cannot be written.
    pub fn mark_welcome_shown(&self) -> Result<()> {
        first_launch::mark_welcome_shown(self.prefs.as_ref())
    }

    /// # Errors
    /// See [`AuthService::sign_up`].
    pub fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        self.auth.sign_up(form)
    }

    /// # Errors
    /// See [`AuthService::login`].
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginOutcome> {
        self.auth.login(&mut self.session, username, password)
    }

    /// # Errors
    /// Returns an error if the preference cannot be written.
    pub fn set_stay_signed_in(&mut self, value: bool) -> Result<()> {
        self.session.set_stay_signed_in(value)
    }

    pub fn log_out(&mut self) {
        self.session.log_out();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::prefs::MemoryPreferences;
    use crate::secrets::{FileSecretStore, MemorySecretStore};

    fn memory_context() -> AppContext {
        AppContext::with_stores(
            Config::default(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(MemorySecretStore::new()),
        )
        .unwrap()
    }

    fn signup(username: &str, password: &str) -> SignUpForm {
        SignUpForm {
            username: username.to_string(),
            email: String::new(),
            password: password.to_string(),
            confirmation: password.to_string(),
        }
    }

    #[test]
    fn test_first_launch_routes_to_welcome_then_login() {
        let ctx = memory_context();
        assert_eq!(ctx.initial_route().unwrap(), Route::Welcome);

        ctx.mark_welcome_shown().unwrap();
        assert_eq!(ctx.initial_route().unwrap(), Route::Login);
    }

    #[test]
    fn test_logged_in_routes_to_dashboard() {
        let mut ctx = memory_context();
        ctx.mark_welcome_shown().unwrap();
        ctx.sign_up(&signup("alice", "secret1")).unwrap();

        assert!(ctx.login("alice", "secret1").unwrap().is_authenticated());
        assert_eq!(ctx.initial_route().unwrap(), Route::Dashboard);

        ctx.log_out();
        assert_eq!(ctx.initial_route().unwrap(), Route::Login);
    }

    #[test]
    fn test_stay_signed_in_survives_process_restart_on_disk() {
        let dir = tempdir().unwrap();
        let open = || {
            AppContext::with_stores(
                Config::default(),
                Arc::new(FilePreferences::new(dir.path().join("prefs.toml"))),
                Arc::new(FileSecretStore::new(dir.path().join("secrets.json"))),
            )
            .unwrap()
        };

        let mut first = open();
        first.mark_welcome_shown().unwrap();
        first.sign_up(&signup("alice", "secret1")).unwrap();
        first.set_stay_signed_in(true).unwrap();
        assert!(first.login("alice", "secret1").unwrap().is_authenticated());
        drop(first);

        let second = open();
        assert!(second.session.logged_in());
        assert!(second.session.was_restored());
        assert_eq!(second.initial_route().unwrap(), Route::Dashboard);
    }

    #[test]
    fn test_policy_comes_from_config() {
        let mut config = Config::default();
        config.auth.require_password_confirmation = false;
        let ctx = AppContext::with_stores(
            config,
            Arc::new(MemoryPreferences::new()),
            Arc::new(MemorySecretStore::new()),
        )
        .unwrap();

        assert!(!ctx.auth.policy().require_password_confirmation);
        assert!(ctx.auth.policy().reject_empty_fields);
    }
}
