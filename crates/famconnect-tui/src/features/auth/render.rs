//! Auth feature view.
//!
//! Rendering functions for the sign-up and login screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{LoginFocus, LoginState, SignUpState};
use crate::common::panel::{ACCENT, ERROR};
use crate::common::{
    TextField, centered_rect, hint_line, render_panel, toggle_line, truncate_with_ellipsis,
};

const FORM_WIDTH: u16 = 52;

pub fn render_signup(frame: &mut Frame, state: &SignUpState, area: Rect) {
    let popup = centered_rect(area, FORM_WIDTH, 17);
    let inner = render_panel(frame, popup, "Sign Up", ACCENT);

    let mut lines = Vec::new();
    for (field, focused) in state.fields() {
        lines.extend(field_lines(field, focused, inner.width));
    }
    lines.push(Line::from(""));
    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(ERROR),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(hint_line(&[
        ("Enter", "create account"),
        ("Tab", "next field"),
        ("Ctrl+L", "log in"),
        ("Esc", "back"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_login(frame: &mut Frame, state: &LoginState, stay_signed_in: bool, area: Rect) {
    let popup = centered_rect(area, FORM_WIDTH, 13);
    let inner = render_panel(frame, popup, "Log In", ACCENT);

    let mut lines = Vec::new();
    lines.extend(field_lines(
        &state.username,
        state.focus == LoginFocus::Username,
        inner.width,
    ));
    lines.extend(field_lines(
        &state.password,
        state.focus == LoginFocus::Password,
        inner.width,
    ));
    lines.push(toggle_line(
        "Stay logged in",
        stay_signed_in,
        state.focus == LoginFocus::StayLoggedIn,
    ));
    lines.push(Line::from(""));
    if state.authentication_failed {
        lines.push(Line::from(Span::styled(
            "Authentication failed",
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(hint_line(&[
        ("Enter", "log in"),
        ("Space", "toggle"),
        ("Ctrl+N", "sign up"),
        ("Esc", "quit"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_lines(field: &TextField, focused: bool, width: u16) -> [Line<'static>; 3] {
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let marker = if focused { "▸ " } else { "  " };
    let cursor = if focused { "█" } else { "" };
    let max = usize::from(width).saturating_sub(4);
    let value = truncate_with_ellipsis(&field.display(), max);

    [
        Line::from(Span::styled(field.label, label_style)),
        Line::from(vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::raw(value),
            Span::styled(cursor, Style::default().fg(ACCENT)),
        ]),
        Line::from(""),
    ]
}
