//! Dashboard key handling.

use crossterm::event::{KeyCode, KeyEvent};
use famconnect_core::shell::Tab;

use super::state::SettingsItem;
use crate::effects::UiEffect;
use crate::state::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let dashboard = &mut app.dashboard;
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            vec![UiEffect::Quit]
        }
        KeyCode::Right | KeyCode::Tab => {
            dashboard.select(dashboard.tab.next());
            vec![]
        }
        KeyCode::Left | KeyCode::BackTab => {
            dashboard.select(dashboard.tab.previous());
            vec![]
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                dashboard.select(tab);
            }
            vec![]
        }
        _ if dashboard.tab == Tab::Settings => handle_settings_key(app, key),
        _ => vec![],
    }
}

fn handle_settings_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let focus = &mut app.dashboard.settings_focus;
    match key.code {
        KeyCode::Up | KeyCode::Down => {
            *focus = focus.toggle();
            vec![]
        }
        KeyCode::Char('s') => vec![UiEffect::SetStaySignedIn(!app.session.stay_signed_in)],
        KeyCode::Char('l') => vec![UiEffect::LogOut],
        KeyCode::Enter | KeyCode::Char(' ') => match *focus {
            SettingsItem::StayLoggedIn => {
                vec![UiEffect::SetStaySignedIn(!app.session.stay_signed_in)]
            }
            SettingsItem::LogOut => vec![UiEffect::LogOut],
        },
        _ => vec![],
    }
}
