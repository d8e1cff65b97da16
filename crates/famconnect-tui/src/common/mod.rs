//! Shared widgets and helpers.

pub mod form;
pub mod panel;
pub mod text;

pub use form::TextField;
pub use panel::{hint_line, render_panel, toggle_line};
pub use text::{centered_rect, truncate_with_ellipsis};
