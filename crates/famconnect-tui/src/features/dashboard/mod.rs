//! Dashboard feature slice: the tabbed main screen.

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{DashboardState, SettingsItem};
pub use update::handle_key;
