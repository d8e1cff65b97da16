//! Dashboard view: tab bar, placeholder panes and the settings list.

use famconnect_core::shell::{Pane, Tab};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use super::state::{DashboardState, SettingsItem};
use crate::common::{hint_line, toggle_line};
use crate::common::panel::{ACCENT, HINT, MUTED};
use crate::state::SessionView;

pub fn render_dashboard(
    frame: &mut Frame,
    state: &DashboardState,
    session: &SessionView,
    area: Rect,
) {
    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    render_tab_bar(frame, state.tab, session, tabs_area);

    if state.tab == Tab::Settings {
        render_settings(frame, state.settings_focus, session, body_area);
    } else {
        render_panes(frame, state.tab, body_area);
    }
}

fn render_tab_bar(frame: &mut Frame, selected: Tab, session: &SessionView, area: Rect) {
    let titles = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())));

    let greeting = match &session.username {
        Some(name) => format!(" FamilyConnect · {name} "),
        None => " FamilyConnect ".to_string(),
    };

    let tabs = Tabs::new(titles)
        .select(selected.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(greeting),
        )
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

/// Home stacks its panes as a column with the middle two side by side;
/// other tabs fill the body with their panes in a row.
fn render_panes(frame: &mut Frame, tab: Tab, area: Rect) {
    let panes = tab.panes();
    if let [top, left, right, bottom] = panes {
        let [top_area, middle_area, bottom_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(middle_area);

        render_pane(frame, *top, top_area);
        render_pane(frame, *left, left_area);
        render_pane(frame, *right, right_area);
        render_pane(frame, *bottom, bottom_area);
        return;
    }

    let areas = Layout::horizontal(vec![Constraint::Fill(1); panes.len()]).split(area);
    for (pane, pane_area) in panes.iter().zip(areas.iter()) {
        render_pane(frame, *pane, *pane_area);
    }
}

fn render_pane(frame: &mut Frame, pane: Pane, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(Span::styled(
            format!(" {} ", pane.title()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let body = Paragraph::new(Line::from(Span::styled(
        pane.placeholder(),
        Style::default().fg(HINT),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, area);
}

fn render_settings(frame: &mut Frame, focus: SettingsItem, session: &SessionView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(Span::styled(
            " Settings ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));

    let log_out_focused = focus == SettingsItem::LogOut;
    let log_out_style = if log_out_focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(""),
        toggle_line(
            "Stay logged in",
            session.stay_signed_in,
            focus == SettingsItem::StayLoggedIn,
        ),
        Line::from(vec![
            Span::styled(
                if log_out_focused { "▸ " } else { "  " },
                Style::default().fg(ACCENT),
            ),
            Span::styled("Log out", log_out_style),
        ]),
        Line::from(""),
        hint_line(&[
            ("Enter", "select"),
            ("s", "toggle stay logged in"),
            ("l", "log out"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
