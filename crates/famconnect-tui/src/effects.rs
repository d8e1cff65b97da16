//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes
//! against the [`AppContext`](famconnect_core::AppContext). The reducer never
//! touches the stores directly.

use famconnect_core::auth::SignUpForm;

#[derive(Debug, Clone)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Persist the first-launch flag.
    MarkWelcomeShown,
    /// Validate and store new credentials.
    SignUp { form: SignUpForm },
    /// Check submitted credentials.
    Login { username: String, password: String },
    /// Persist the "stay logged in" preference.
    SetStaySignedIn(bool),
    /// End the current session.
    LogOut,
}
