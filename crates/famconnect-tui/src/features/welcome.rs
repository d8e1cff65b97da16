//! Welcome screen shown on first launch.

use crossterm::event::{KeyCode, KeyEvent};
use famconnect_core::shell::Route;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::panel::{ACCENT, HINT};
use crate::common::{centered_rect, hint_line, render_panel};
use crate::effects::UiEffect;
use crate::state::AppState;

const TAGLINE: &str = "Stay close to the people who matter.";
const BLURB: &str = "Keep track of your family, see what's new, and get gentle \
                     reminders to reach out.";

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => app.navigate(Route::SignUp),
        KeyCode::Char('l') => app.navigate(Route::Login),
        KeyCode::Esc | KeyCode::Char('q') => {
            app.should_quit = true;
            vec![UiEffect::Quit]
        }
        _ => vec![],
    }
}

pub fn render(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 56, 12);
    let inner = render_panel(frame, popup, "Welcome", ACCENT);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "FamilyConnect",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(TAGLINE),
        Line::from(""),
        Line::from(Span::styled(BLURB, Style::default().fg(HINT))),
        Line::from(""),
        hint_line(&[("Enter", "get started"), ("l", "log in"), ("q", "quit")]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
