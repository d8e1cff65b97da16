//! Sign-up and login against the local secret store.
//!
//! Sign-up stores the single credential pair (overwriting any previous one).
//! Login compares the submitted pair against the stored one and moves the
//! session accordingly. There is no lockout or attempt counting.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AuthConfig;
use crate::secrets::{Credentials, SecretStore};
use crate::session::SessionState;

/// Data collected by the sign-up screen.
#[derive(Clone, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl std::fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Which required sign-up field was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Username,
    Password,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Username => "Username",
            RequiredField::Password => "Password",
        }
    }
}

/// Sign-up rejected before anything was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpError {
    MissingField(RequiredField),
    PasswordMismatch,
}

impl std::fmt::Display for SignUpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignUpError::MissingField(field) => write!(f, "{} cannot be empty", field.label()),
            SignUpError::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for SignUpError {}

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    AuthenticationFailed,
}

impl LoginOutcome {
    pub fn is_authenticated(self) -> bool {
        matches!(self, LoginOutcome::Authenticated)
    }

    /// User-facing message for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            LoginOutcome::Authenticated => "Logged in successfully",
            LoginOutcome::AuthenticationFailed => "Authentication failed",
        }
    }
}

/// Sign-up validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub require_password_confirmation: bool,
    pub reject_empty_fields: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for AuthPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            require_password_confirmation: config.require_password_confirmation,
            reject_empty_fields: config.reject_empty_fields,
        }
    }
}

impl AuthPolicy {
    /// Checks a sign-up form against the policy.
    ///
    /// # Errors
    /// Returns the first rule the form breaks.
    pub fn validate(&self, form: &SignUpForm) -> std::result::Result<(), SignUpError> {
        if self.reject_empty_fields {
            if form.username.is_empty() {
                return Err(SignUpError::MissingField(RequiredField::Username));
            }
            if form.password.is_empty() {
                return Err(SignUpError::MissingField(RequiredField::Password));
            }
        }
        if self.require_password_confirmation && form.password != form.confirmation {
            return Err(SignUpError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Orchestrates sign-up and login over a [`SecretStore`].
#[derive(Clone)]
pub struct AuthService {
    secrets: Arc<dyn SecretStore>,
    policy: AuthPolicy,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("secrets", &self.secrets.describe())
            .field("policy", &self.policy)
            .finish()
    }
}

impl AuthService {
    pub fn new(secrets: Arc<dyn SecretStore>, policy: AuthPolicy) -> Self {
        Self { secrets, policy }
    }

    pub fn secrets(&self) -> &Arc<dyn SecretStore> {
        &self.secrets
    }

    pub fn policy(&self) -> AuthPolicy {
        self.policy
    }

    /// Validates the form and stores its credentials, replacing any
    /// previously stored pair.
    ///
    /// # Errors
    /// Returns a [`SignUpError`] (recoverable with `downcast_ref`) if the form
    /// fails validation, or the store's error if the write fails.
    pub fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        if let Err(e) = self.policy.validate(form) {
            tracing::info!(event = "auth.signup_rejected", username = %form.username, reason = %e);
            return Err(e.into());
        }

        // An unreadable previous pair is overwritten, not reported.
        let replaced = self
            .secrets
            .retrieve()
            .is_ok_and(|stored| stored.username.is_some());
        self.secrets
            .store(&Credentials::new(&form.username, &form.password))
            .context("Failed to store credentials")?;

        tracing::info!(event = "auth.signup_completed", username = %form.username, replaced);
        tracing::debug!(event = "auth.signup_email", email = %form.email);
        Ok(())
    }

    /// Compares the submitted pair with the stored pair and updates the
    /// session: logged in on an exact match, logged out otherwise.
    ///
    /// A failed attempt while already logged in ends the current session.
    ///
    /// # Errors
    /// Returns an error only if the secret store cannot be read.
    pub fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome> {
        let stored = self
            .secrets
            .retrieve()
            .context("Failed to read stored credentials")?;

        if stored.matches(username, password) {
            session.set_logged_in(true);
            tracing::info!(event = "auth.login_succeeded", username = %username);
            Ok(LoginOutcome::Authenticated)
        } else {
            let was_logged_in = session.logged_in();
            session.set_logged_in(false);
            tracing::warn!(
                event = "auth.login_failed",
                username = %username,
                has_stored_credentials = stored.is_complete(),
                ended_session = was_logged_in,
            );
            Ok(LoginOutcome::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{MemoryPreferences, PreferenceStore, STAY_LOGGED_IN_KEY};
    use crate::secrets::{FileSecretStore, MemorySecretStore};

    fn form(username: &str, password: &str) -> SignUpForm {
        SignUpForm {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
            confirmation: password.to_string(),
        }
    }

    fn setup() -> (AuthService, SessionState) {
        let auth = AuthService::new(Arc::new(MemorySecretStore::new()), AuthPolicy::default());
        let session = SessionState::restore(Arc::new(MemoryPreferences::new())).unwrap();
        (auth, session)
    }

    #[test]
    fn test_sign_up_then_login_succeeds() {
        let (auth, mut session) = setup();

        auth.sign_up(&form("alice", "secret1")).unwrap();
        let outcome = auth.login(&mut session, "alice", "secret1").unwrap();

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(session.logged_in());
    }

    #[test]
    fn test_login_before_sign_up_fails() {
        let (auth, mut session) = setup();

        let outcome = auth.login(&mut session, "alice", "secret1").unwrap();
        assert_eq!(outcome, LoginOutcome::AuthenticationFailed);
        assert!(!session.logged_in());

        let outcome = auth.login(&mut session, "", "").unwrap();
        assert_eq!(outcome, LoginOutcome::AuthenticationFailed);
    }

    #[test]
    fn test_mismatched_username_or_password_fails() {
        let (auth, mut session) = setup();
        auth.sign_up(&form("alice", "secret1")).unwrap();

        for (user, pass) in [("bob", "secret1"), ("alice", "secret2"), ("ALICE", "secret1")] {
            let outcome = auth.login(&mut session, user, pass).unwrap();
            assert_eq!(outcome, LoginOutcome::AuthenticationFailed, "{user}/{pass}");
            assert!(!session.logged_in());
        }
    }

    #[test]
    fn test_sign_up_overwrites_previous_credentials() {
        let (auth, mut session) = setup();

        auth.sign_up(&form("A", "p1")).unwrap();
        auth.sign_up(&form("B", "p2")).unwrap();

        assert!(!auth.login(&mut session, "A", "p1").unwrap().is_authenticated());
        assert!(auth.login(&mut session, "B", "p2").unwrap().is_authenticated());
    }

    #[test]
    fn test_failed_login_while_logged_in_logs_out() {
        let (auth, mut session) = setup();
        auth.sign_up(&form("alice", "secret1")).unwrap();

        auth.login(&mut session, "alice", "secret1").unwrap();
        assert!(session.logged_in());

        let outcome = auth.login(&mut session, "alice", "wrong").unwrap();
        assert_eq!(outcome, LoginOutcome::AuthenticationFailed);
        assert!(!session.logged_in());
    }

    #[test]
    fn test_mismatched_confirmation_stores_nothing() {
        let (auth, mut session) = setup();
        let mut bad = form("alice", "secret1");
        bad.confirmation = "secret2".to_string();

        let err = auth.sign_up(&bad).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SignUpError>(),
            Some(&SignUpError::PasswordMismatch)
        );
        assert!(!auth.secrets().retrieve().unwrap().is_complete());
        assert!(!auth.login(&mut session, "alice", "secret1").unwrap().is_authenticated());
    }

    #[test]
    fn test_empty_fields_rejected_by_default() {
        let (auth, _) = setup();

        let err = auth.sign_up(&form("", "secret1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SignUpError>(),
            Some(&SignUpError::MissingField(RequiredField::Username))
        );

        let err = auth.sign_up(&form("alice", "")).unwrap_err();
        assert_eq!(err.to_string(), "Password cannot be empty");
    }

    #[test]
    fn test_permissive_policy_stores_as_entered() {
        let policy = AuthPolicy {
            require_password_confirmation: false,
            reject_empty_fields: false,
        };
        let auth = AuthService::new(Arc::new(MemorySecretStore::new()), policy);
        let mut session = SessionState::restore(Arc::new(MemoryPreferences::new())).unwrap();

        let mut entered = form("alice", "");
        entered.confirmation = "ignored".to_string();
        auth.sign_up(&entered).unwrap();

        assert!(auth.login(&mut session, "alice", "").unwrap().is_authenticated());
    }

    #[test]
    fn test_log_out_after_login_regardless_of_stay() {
        let (auth, mut session) = setup();
        auth.sign_up(&form("alice", "secret1")).unwrap();
        auth.login(&mut session, "alice", "secret1").unwrap();
        session.set_stay_signed_in(true).unwrap();

        session.log_out();

        assert!(!session.logged_in());
        assert!(session.stay_signed_in());
    }

    #[test]
    fn test_restored_session_skips_credential_check() {
        let prefs = Arc::new(MemoryPreferences::new());
        prefs.set_bool(STAY_LOGGED_IN_KEY, true).unwrap();
        let auth = AuthService::new(Arc::new(MemorySecretStore::new()), AuthPolicy::default());

        let session = SessionState::restore(prefs).unwrap();

        assert!(session.logged_in());
        assert!(!auth.secrets().retrieve().unwrap().is_complete());
    }

    #[test]
    fn test_sign_up_overwrites_unreadable_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, "").unwrap();
        let auth = AuthService::new(Arc::new(FileSecretStore::new(path)), AuthPolicy::default());
        let mut session = SessionState::restore(Arc::new(MemoryPreferences::new())).unwrap();

        auth.sign_up(&form("alice", "secret1")).unwrap();
        let outcome = auth.login(&mut session, "alice", "secret1").unwrap();

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(session.logged_in());
    }
}
