//! Top-level navigation model and dashboard content.
//!
//! Everything here is display data or pure routing; the TUI renders it.

use anyhow::Result;

use crate::prefs::{PreferenceStore, WELCOME_SCREEN_SHOWN_KEY};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Welcome,
    SignUp,
    Login,
    Dashboard,
}

impl Route {
    /// Startup routing: the welcome screen until it has been shown once,
    /// then the dashboard when logged in and the login screen otherwise.
    pub fn resolve(welcome_shown: bool, logged_in: bool) -> Self {
        match (welcome_shown, logged_in) {
            (false, _) => Route::Welcome,
            (true, true) => Route::Dashboard,
            (true, false) => Route::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Welcome => "Welcome",
            Route::SignUp => "Sign Up",
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
        }
    }
}

pub mod first_launch {
    //! One-time welcome gate.

    use super::{PreferenceStore, Result, WELCOME_SCREEN_SHOWN_KEY};

    /// Whether the welcome screen has been shown before.
    ///
    /// # Errors
    /// Returns an error if the preference store cannot be read.
    pub fn welcome_shown(prefs: &dyn PreferenceStore) -> Result<bool> {
        Ok(prefs.get_bool(WELCOME_SCREEN_SHOWN_KEY)?.unwrap_or(false))
    }

    /// Records that the welcome screen was shown. Never reset.
    ///
    /// # Errors
    /// Returns an error if the preference store cannot be written.
    pub fn mark_welcome_shown(prefs: &dyn PreferenceStore) -> Result<()> {
        if welcome_shown(prefs)? {
            return Ok(());
        }
        prefs.set_bool(WELCOME_SCREEN_SHOWN_KEY, true)?;
        tracing::info!(event = "shell.welcome_shown");
        Ok(())
    }
}

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Connections,
    Search,
    Messages,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::Connections,
            Tab::Search,
            Tab::Messages,
            Tab::Settings,
        ]
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::all().get(index).copied()
    }

    pub fn next(self) -> Tab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(self) -> Tab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Connections => "Connections",
            Tab::Search => "Search",
            Tab::Messages => "Messages",
            Tab::Settings => "Settings",
        }
    }

    /// Panes shown on this tab. Settings has its own view and no panes.
    pub fn panes(self) -> &'static [Pane] {
        match self {
            Tab::Home => &[
                Pane::RecentContacts,
                Pane::Notifications,
                Pane::Search,
                Pane::SuggestedActions,
            ],
            Tab::Connections => &[Pane::Notifications],
            Tab::Search => &[Pane::Search],
            Tab::Messages => &[Pane::SuggestedActions],
            Tab::Settings => &[],
        }
    }
}

/// Static placeholder panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    RecentContacts,
    Notifications,
    Search,
    SuggestedActions,
}

impl Pane {
    pub fn title(self) -> &'static str {
        match self {
            Pane::RecentContacts => "Recent Contacts",
            Pane::Notifications => "Notifications",
            Pane::Search => "Search",
            Pane::SuggestedActions => "AI Suggested Actions",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Pane::RecentContacts => "No recent contacts yet.",
            Pane::Notifications => "You're all caught up.",
            Pane::Search => "Search is coming soon.",
            Pane::SuggestedActions => "No suggestions right now.",
        }
    }
}
