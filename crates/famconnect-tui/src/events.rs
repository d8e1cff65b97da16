//! Events consumed by the reducer.

use crossterm::event::Event;
use famconnect_core::auth::LoginOutcome;
use famconnect_core::session::SessionChange;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Raw terminal input.
    Terminal(Event),
    /// Session notification from the subscription.
    Session(SessionChange),
    /// Sign-up finished; the error is the user-facing message.
    SignUpFinished(Result<(), String>),
    /// Login finished; the error is a storage failure, not a mismatch.
    LoginFinished {
        username: String,
        result: Result<LoginOutcome, String>,
    },
    /// An effect failed at the storage layer.
    EffectFailed(String),
}
