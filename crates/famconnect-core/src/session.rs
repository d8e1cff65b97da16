//! Session state: `logged_in` (memory only) and `stay_signed_in` (persisted).
//!
//! ## Lifecycle
//!
//! ```text
//!            login ok / restore
//! LoggedOut ───────────────────▶ LoggedIn
//!     ▲                              │
//!     └──────────────────────────────┘
//!          log_out / login failed
//! ```
//!
//! A fresh `SessionState` is built once per process with [`SessionState::restore`].
//! When the persisted "stay logged in" flag is set, the session starts logged
//! in without re-checking stored credentials.
//!
//! Observers register with [`SessionState::subscribe`] and are called
//! synchronously, only when a value actually changes.

use std::sync::Arc;

use anyhow::Result;

use crate::prefs::{PreferenceStore, STAY_LOGGED_IN_KEY};

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    LoggedIn,
    LoggedOut,
    StaySignedInChanged(bool),
}

/// Handle returned by [`SessionState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(SessionChange)>;

pub struct SessionState {
    logged_in: bool,
    stay_signed_in: bool,
    restored: bool,
    prefs: Arc<dyn PreferenceStore>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("logged_in", &self.logged_in)
            .field("stay_signed_in", &self.stay_signed_in)
            .field("restored", &self.restored)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl SessionState {
    /// Builds the session for this process from persisted preferences.
    ///
    /// # Errors
    /// Returns an error if the preference store cannot be read.
    pub fn restore(prefs: Arc<dyn PreferenceStore>) -> Result<Self> {
        let stay_signed_in = prefs.get_bool(STAY_LOGGED_IN_KEY)?.unwrap_or(false);

        if stay_signed_in {
            tracing::info!(event = "session.restored", stay_signed_in = true);
        } else {
            tracing::debug!(event = "session.started", stay_signed_in = false);
        }

        Ok(Self {
            logged_in: stay_signed_in,
            stay_signed_in,
            restored: stay_signed_in,
            prefs,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn stay_signed_in(&self) -> bool {
        self.stay_signed_in
    }

    /// True when this process started logged in from the persisted flag.
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    /// Updates the "stay logged in" preference.
    ///
    /// The value is written to the preference store before memory is
    /// updated, so a failed write leaves the session unchanged.
    ///
    /// # Errors
    /// Returns an error if the preference store cannot be written.
    pub fn set_stay_signed_in(&mut self, value: bool) -> Result<()> {
        self.prefs.set_bool(STAY_LOGGED_IN_KEY, value)?;

        if self.stay_signed_in != value {
            self.stay_signed_in = value;
            tracing::info!(event = "session.stay_signed_in_changed", value);
            self.notify(SessionChange::StaySignedInChanged(value));
        }
        Ok(())
    }

    /// Ends the in-memory session. `stay_signed_in` is left as is.
    pub fn log_out(&mut self) {
        self.set_logged_in(false);
    }

    pub(crate) fn set_logged_in(&mut self, value: bool) {
        if self.logged_in == value {
            return;
        }
        self.logged_in = value;
        if value {
            tracing::info!(event = "session.logged_in");
            self.notify(SessionChange::LoggedIn);
        } else {
            tracing::info!(event = "session.logged_out");
            self.notify(SessionChange::LoggedOut);
        }
    }

    /// Registers a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(SessionChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: SessionChange) {
        for (_, callback) in &mut self.subscribers {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::prefs::MemoryPreferences;

    fn prefs_with_stay(value: Option<bool>) -> Arc<dyn PreferenceStore> {
        let prefs = MemoryPreferences::new();
        if let Some(value) = value {
            prefs.set_bool(STAY_LOGGED_IN_KEY, value).unwrap();
        }
        Arc::new(prefs)
    }

    fn recorder(session: &mut SessionState) -> Rc<RefCell<Vec<SessionChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |change| sink.borrow_mut().push(change));
        seen
    }

    #[test]
    fn test_fresh_start_is_logged_out() {
        let session = SessionState::restore(prefs_with_stay(None)).unwrap();

        assert!(!session.logged_in());
        assert!(!session.stay_signed_in());
        assert!(!session.was_restored());
    }

    #[test]
    fn test_stay_signed_in_restores_without_check() {
        let session = SessionState::restore(prefs_with_stay(Some(true))).unwrap();

        assert!(session.logged_in());
        assert!(session.stay_signed_in());
        assert!(session.was_restored());
    }

    #[test]
    fn test_set_stay_signed_in_persists_immediately() {
        let prefs = prefs_with_stay(None);
        let mut session = SessionState::restore(Arc::clone(&prefs)).unwrap();

        session.set_stay_signed_in(true).unwrap();
        assert_eq!(prefs.get_bool(STAY_LOGGED_IN_KEY).unwrap(), Some(true));

        let next_process = SessionState::restore(prefs).unwrap();
        assert!(next_process.logged_in());
    }

    #[test]
    fn test_log_out_keeps_stay_signed_in() {
        let mut session = SessionState::restore(prefs_with_stay(Some(true))).unwrap();

        session.log_out();

        assert!(!session.logged_in());
        assert!(session.stay_signed_in());
    }

    #[test]
    fn test_log_out_without_stay_only_ends_session() {
        let mut session = SessionState::restore(prefs_with_stay(Some(false))).unwrap();
        session.set_logged_in(true);
        let seen = recorder(&mut session);

        session.log_out();

        assert!(!session.logged_in());
        assert!(!session.stay_signed_in());
        assert_eq!(*seen.borrow(), vec![SessionChange::LoggedOut]);
    }

    #[test]
    fn test_log_out_when_already_logged_out() {
        let mut session = SessionState::restore(prefs_with_stay(Some(false))).unwrap();
        let seen = recorder(&mut session);

        session.log_out();

        assert!(!session.logged_in());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_subscribers_see_only_real_changes() {
        let mut session = SessionState::restore(prefs_with_stay(None)).unwrap();
        let seen = recorder(&mut session);

        session.set_logged_in(true);
        session.set_logged_in(true);
        session.set_stay_signed_in(true).unwrap();
        session.set_stay_signed_in(true).unwrap();
        session.log_out();

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionChange::LoggedIn,
                SessionChange::StaySignedInChanged(true),
                SessionChange::LoggedOut,
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = SessionState::restore(prefs_with_stay(None)).unwrap();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |_| *sink.borrow_mut() += 1);

        session.set_logged_in(true);
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.log_out();

        assert_eq!(*seen.borrow(), 1);
    }
}
