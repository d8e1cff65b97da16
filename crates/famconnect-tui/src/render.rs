//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use famconnect_core::shell::Route;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::panel::{ACCENT, ERROR, HINT};
use crate::common::truncate_with_ellipsis;
use crate::state::{AppState, StatusKind};
use crate::{auth, dashboard, welcome};

/// Height of the status line at the bottom of the screen.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .areas(frame.area());

    match app.route {
        Route::Welcome => welcome::render(frame, body),
        Route::SignUp => auth::render_signup(frame, &app.signup, body),
        Route::Login => auth::render_login(frame, &app.login, app.session.stay_signed_in, body),
        Route::Dashboard => {
            dashboard::render_dashboard(frame, &app.dashboard, &app.session, body);
        }
    }

    render_status_line(frame, app, status);
}

fn render_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let width = usize::from(area.width);
    let line = match &app.status {
        Some(message) => {
            let color = match message.kind {
                StatusKind::Info => ACCENT,
                StatusKind::Error => ERROR,
            };
            Line::from(Span::styled(
                truncate_with_ellipsis(&message.text, width),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            truncate_with_ellipsis(
                &format!("{} · Ctrl+C quit", app.route.title()),
                width,
            ),
            Style::default().fg(HINT),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::state::{SessionView, StatusMessage};

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 28)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_each_route_renders() {
        for (route, marker) in [
            (Route::Welcome, "FamilyConnect"),
            (Route::SignUp, "Sign Up"),
            (Route::Login, "Log In"),
            (Route::Dashboard, "Recent Contacts"),
        ] {
            let app = AppState::new(route, SessionView::default());
            assert!(draw(&app).contains(marker), "{route:?} missing {marker}");
        }
    }

    #[test]
    fn test_status_message_replaces_hint() {
        let mut app = AppState::new(Route::Login, SessionView::default());
        app.status = Some(StatusMessage::error("Could not save preference"));
        let text = draw(&app);
        assert!(text.contains("Could not save preference"));
        assert!(!text.contains("Ctrl+C quit"));
    }
}
