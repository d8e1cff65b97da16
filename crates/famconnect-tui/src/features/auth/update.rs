//! Auth feature reducer.
//!
//! Key handling for the sign-up and login screens, and processing of the
//! results the runtime reports back.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use famconnect_core::auth::LoginOutcome;
use famconnect_core::shell::Route;

use super::state::LoginFocus;
use crate::effects::UiEffect;
use crate::state::{AppState, StatusMessage};

pub fn handle_signup_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.navigate(Route::Welcome),
        KeyCode::Char('l') if ctrl => app.navigate(Route::Login),
        KeyCode::Tab | KeyCode::Down => {
            app.signup.focus = app.signup.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.signup.focus = app.signup.focus.previous();
            vec![]
        }
        KeyCode::Enter => {
            app.signup.error = None;
            vec![UiEffect::SignUp {
                form: app.signup.to_form(),
            }]
        }
        _ => {
            if app.signup.focused_mut().handle_key(key) {
                app.signup.error = None;
            }
            vec![]
        }
    }
}

pub fn handle_login_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            vec![UiEffect::Quit]
        }
        KeyCode::Char('n') if ctrl => app.navigate(Route::SignUp),
        KeyCode::Tab | KeyCode::Down => {
            app.login.focus = app.login.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.login.focus = app.login.focus.previous();
            vec![]
        }
        KeyCode::Char(' ') if app.login.focus == LoginFocus::StayLoggedIn => {
            vec![UiEffect::SetStaySignedIn(!app.session.stay_signed_in)]
        }
        KeyCode::Enter => vec![UiEffect::Login {
            username: app.login.username.value().to_string(),
            password: app.login.password.value().to_string(),
        }],
        _ => {
            if let Some(field) = app.login.focused_mut() {
                field.handle_key(key);
            }
            vec![]
        }
    }
}

/// Applies the sign-up result: success moves to login with the username
/// prefilled; failure stays on the form with the message shown.
pub fn handle_signup_result(app: &mut AppState, result: Result<(), String>) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            let username = app.signup.username.value().to_string();
            app.signup.reset();
            app.login.prefill(&username);
            let effects = app.navigate(Route::Login);
            app.status = Some(StatusMessage::info("Account created. Log in to continue."));
            effects
        }
        Err(message) => {
            app.signup.error = Some(message);
            app.signup.password.clear();
            app.signup.confirmation.clear();
            vec![]
        }
    }
}

/// Applies the login result. Routing to the dashboard happens here; the
/// session mirror is updated separately by the subscription.
pub fn handle_login_result(
    app: &mut AppState,
    username: String,
    result: Result<LoginOutcome, String>,
) -> Vec<UiEffect> {
    app.login.password.clear();
    match result {
        Ok(LoginOutcome::Authenticated) => {
            app.login.authentication_failed = false;
            app.session.username = Some(username);
            app.navigate(Route::Dashboard)
        }
        Ok(LoginOutcome::AuthenticationFailed) => {
            app.login.authentication_failed = true;
            app.login.focus = LoginFocus::Password;
            vec![]
        }
        Err(message) => {
            app.status = Some(StatusMessage::error(message));
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionView;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str, handler: fn(&mut AppState, KeyEvent) -> Vec<UiEffect>) {
        for c in text.chars() {
            handler(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_signup_enter_emits_form() {
        let mut app = AppState::new(Route::SignUp, SessionView::default());
        type_text(&mut app, "alice", handle_signup_key);
        handle_signup_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "a@example.com", handle_signup_key);
        handle_signup_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret1", handle_signup_key);
        handle_signup_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret1", handle_signup_key);

        let effects = handle_signup_key(&mut app, key(KeyCode::Enter));
        let [UiEffect::SignUp { form }] = effects.as_slice() else {
            panic!("expected SignUp effect, got {effects:?}");
        };
        assert_eq!(form.username, "alice");
        assert_eq!(form.email, "a@example.com");
        assert_eq!(form.password, "secret1");
        assert_eq!(form.confirmation, "secret1");
    }

    #[test]
    fn test_signup_success_moves_to_login_prefilled() {
        let mut app = AppState::new(Route::SignUp, SessionView::default());
        app.signup.username.set("alice");
        app.signup.password.set("secret1");

        handle_signup_result(&mut app, Ok(()));

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login.username.value(), "alice");
        assert_eq!(app.login.focus, LoginFocus::Password);
        assert!(app.signup.password.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_signup_failure_keeps_form_and_shows_error() {
        let mut app = AppState::new(Route::SignUp, SessionView::default());
        app.signup.username.set("alice");
        app.signup.password.set("a");
        app.signup.confirmation.set("b");

        handle_signup_result(&mut app, Err("Passwords do not match".to_string()));

        assert_eq!(app.route, Route::SignUp);
        assert_eq!(app.signup.username.value(), "alice");
        assert!(app.signup.password.is_empty());
        assert_eq!(app.signup.error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_login_failure_sets_flag_and_clears_password() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        app.login.username.set("alice");
        app.login.password.set("wrong");

        handle_login_result(
            &mut app,
            "alice".to_string(),
            Ok(LoginOutcome::AuthenticationFailed),
        );

        assert!(app.login.authentication_failed);
        assert!(app.login.password.is_empty());
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn test_login_success_routes_to_dashboard() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        app.login.authentication_failed = true;

        handle_login_result(&mut app, "alice".to_string(), Ok(LoginOutcome::Authenticated));

        assert_eq!(app.route, Route::Dashboard);
        assert!(!app.login.authentication_failed);
        assert_eq!(app.session.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_space_on_toggle_requests_flip() {
        let mut app = AppState::new(
            Route::Login,
            SessionView {
                stay_signed_in: true,
                ..SessionView::default()
            },
        );
        app.login.focus = LoginFocus::StayLoggedIn;

        let effects = handle_login_key(&mut app, key(KeyCode::Char(' ')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SetStaySignedIn(false)]
        ));
    }

    #[test]
    fn test_space_in_username_is_text() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        handle_login_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.login.username.value(), " ");
    }

    #[test]
    fn test_login_links_to_signup() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        handle_login_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.route, Route::SignUp);
    }
}
