//! Effect handlers.
//!
//! Each handler performs one effect against the [`AppContext`] and returns
//! the event that reports its result. Session changes caused by a handler
//! arrive separately through the session subscription.

use famconnect_core::AppContext;
use famconnect_core::auth::{SignUpError, SignUpForm};

use crate::events::UiEvent;

pub fn mark_welcome_shown(ctx: &AppContext) -> Option<UiEvent> {
    match ctx.mark_welcome_shown() {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(event = "tui.welcome_flag_failed", error = %format!("{e:#}"));
            Some(UiEvent::EffectFailed(format!(
                "Could not save first-launch flag: {e:#}"
            )))
        }
    }
}

pub fn sign_up(ctx: &AppContext, form: &SignUpForm) -> UiEvent {
    let result = ctx.sign_up(form).map_err(|e| {
        if let Some(rejected) = e.downcast_ref::<SignUpError>() {
            rejected.to_string()
        } else {
            tracing::error!(event = "tui.signup_failed", error = %format!("{e:#}"));
            format!("Could not save account: {e:#}")
        }
    });
    UiEvent::SignUpFinished(result)
}

pub fn login(ctx: &mut AppContext, username: String, password: &str) -> UiEvent {
    let result = ctx.login(&username, password).map_err(|e| {
        tracing::error!(event = "tui.login_failed", error = %format!("{e:#}"));
        format!("Could not read stored credentials: {e:#}")
    });
    UiEvent::LoginFinished { username, result }
}

pub fn set_stay_signed_in(ctx: &mut AppContext, value: bool) -> Option<UiEvent> {
    match ctx.set_stay_signed_in(value) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(event = "tui.preference_failed", error = %format!("{e:#}"));
            Some(UiEvent::EffectFailed(format!(
                "Could not save preference: {e:#}"
            )))
        }
    }
}
