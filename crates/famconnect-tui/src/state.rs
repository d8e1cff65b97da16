//! Application state composition.
//!
//! ```text
//! AppState
//! ├── route: Route               (current top-level screen)
//! ├── session: SessionView       (mirror of the core session, fed by subscription)
//! ├── signup: SignUpState        (sign-up form)
//! ├── login: LoginState          (login form + authentication-failed flag)
//! ├── dashboard: DashboardState  (selected tab)
//! └── status: Option<StatusMessage>
//! ```
//!
//! The reducer owns this state; the core `SessionState` stays in the
//! runtime's `AppContext` and reaches the UI only through `SessionChange`
//! events.

use famconnect_core::session::SessionChange;
use famconnect_core::shell::Route;

use crate::auth::{LoginState, SignUpState};
use crate::dashboard::DashboardState;
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// What the UI knows about the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub logged_in: bool,
    pub stay_signed_in: bool,
    /// Name of the user who logged in during this run, if any.
    pub username: Option<String>,
}

impl SessionView {
    pub fn apply(&mut self, change: SessionChange) {
        match change {
            SessionChange::LoggedIn => self.logged_in = true,
            SessionChange::LoggedOut => {
                self.logged_in = false;
                self.username = None;
            }
            SessionChange::StaySignedInChanged(value) => self.stay_signed_in = value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub route: Route,
    pub should_quit: bool,
    pub session: SessionView,
    pub signup: SignUpState,
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(route: Route, session: SessionView) -> Self {
        Self {
            route,
            should_quit: false,
            session,
            signup: SignUpState::default(),
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            status: None,
        }
    }

    /// Effects to run once before the first frame.
    pub fn startup_effects(&self) -> Vec<UiEffect> {
        if self.route == Route::Welcome {
            vec![UiEffect::MarkWelcomeShown]
        } else {
            vec![]
        }
    }

    /// Switches screens, clearing any transient status line.
    pub fn navigate(&mut self, route: Route) -> Vec<UiEffect> {
        if self.route == route {
            return vec![];
        }
        tracing::debug!(event = "tui.navigate", from = self.route.title(), to = route.title());
        self.route = route;
        self.status = None;
        if route == Route::Welcome {
            vec![UiEffect::MarkWelcomeShown]
        } else {
            vec![]
        }
    }
}
