//! Palette and bordered panel helpers shared by every screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear};

/// Accent for focus, selection and primary actions.
pub const ACCENT: Color = Color::Green;
/// Unselected tab labels.
pub const MUTED: Color = Color::Rgb(153, 102, 51);
/// Hints and secondary text.
pub const HINT: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;

/// Clears `area` and draws a titled border. Returns the inner area.
pub fn render_panel(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A dim key-hint line, e.g. `Enter submit · Esc back`.
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(HINT)));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label}"), Style::default().fg(HINT)));
    }
    Line::from(spans)
}

/// A checkbox row with an optional focus marker.
pub fn toggle_line(label: &str, on: bool, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let check = if on { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(format!("{check} {label}"), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_line_joins_pairs() {
        let line = hint_line(&[("Enter", "submit"), ("Esc", "back")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter submit · Esc back");
    }
}
