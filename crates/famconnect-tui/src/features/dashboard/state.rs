//! Dashboard state.

use famconnect_core::shell::Tab;

/// Selectable rows on the Settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsItem {
    #[default]
    StayLoggedIn,
    LogOut,
}

impl SettingsItem {
    pub fn toggle(self) -> Self {
        match self {
            SettingsItem::StayLoggedIn => SettingsItem::LogOut,
            SettingsItem::LogOut => SettingsItem::StayLoggedIn,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub tab: Tab,
    pub settings_focus: SettingsItem,
}

impl DashboardState {
    pub fn select(&mut self, tab: Tab) {
        if self.tab != tab {
            tracing::debug!(event = "tui.tab_selected", tab = tab.label());
            self.tab = tab;
        }
    }
}
