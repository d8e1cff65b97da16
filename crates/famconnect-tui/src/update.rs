//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use famconnect_core::session::SessionChange;
use famconnect_core::shell::Route;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, StatusMessage};
use crate::{auth, dashboard, welcome};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Session(change) => handle_session_change(app, change),
        UiEvent::SignUpFinished(result) => auth::handle_signup_result(app, result),
        UiEvent::LoginFinished { username, result } => {
            auth::handle_login_result(app, username, result)
        }
        UiEvent::EffectFailed(message) => {
            app.status = Some(StatusMessage::error(message));
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }

    match app.route {
        Route::Welcome => welcome::handle_key(app, key),
        Route::SignUp => auth::handle_signup_key(app, key),
        Route::Login => auth::handle_login_key(app, key),
        Route::Dashboard => dashboard::handle_key(app, key),
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    match app.route {
        Route::SignUp => app.signup.focused_mut().paste(text),
        Route::Login => {
            if let Some(field) = app.login.focused_mut() {
                field.paste(text);
            }
        }
        Route::Welcome | Route::Dashboard => {}
    }
}

/// Mirrors a session change and leaves the dashboard when the session ends.
fn handle_session_change(app: &mut AppState, change: SessionChange) -> Vec<UiEffect> {
    app.session.apply(change);
    match change {
        SessionChange::LoggedOut if app.route == Route::Dashboard => {
            app.dashboard = dashboard::DashboardState::default();
            app.navigate(Route::Login)
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use famconnect_core::auth::LoginOutcome;
    use famconnect_core::shell::Tab;

    use super::*;
    use crate::state::SessionView;

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers)))
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        for route in [Route::Welcome, Route::SignUp, Route::Login, Route::Dashboard] {
            let mut app = AppState::new(route, SessionView::default());
            let effects = update(
                &mut app,
                key_event(KeyCode::Char('c'), KeyModifiers::CONTROL),
            );
            assert!(app.should_quit);
            assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        update(&mut app, UiEvent::Terminal(Event::Key(key)));
        assert!(app.login.username.is_empty());
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = AppState::new(Route::SignUp, SessionView::default());
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("alice\n".to_string())),
        );
        assert_eq!(app.signup.username.value(), "alice");
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut app = AppState::new(
            Route::Dashboard,
            SessionView {
                logged_in: true,
                stay_signed_in: false,
                username: Some("alice".to_string()),
            },
        );
        app.dashboard.select(Tab::Settings);

        update(&mut app, UiEvent::Session(SessionChange::LoggedOut));

        assert_eq!(app.route, Route::Login);
        assert!(!app.session.logged_in);
        assert_eq!(app.dashboard.tab, Tab::Home);
    }

    #[test]
    fn test_failed_login_while_on_login_stays() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        update(&mut app, UiEvent::Session(SessionChange::LoggedOut));
        update(
            &mut app,
            UiEvent::LoginFinished {
                username: "alice".to_string(),
                result: Ok(LoginOutcome::AuthenticationFailed),
            },
        );
        assert_eq!(app.route, Route::Login);
        assert!(app.login.authentication_failed);
    }

    #[test]
    fn test_effect_failure_shows_status() {
        let mut app = AppState::new(Route::Dashboard, SessionView::default());
        update(&mut app, UiEvent::EffectFailed("disk full".to_string()));
        assert_eq!(app.status, Some(StatusMessage::error("disk full")));
    }
}
