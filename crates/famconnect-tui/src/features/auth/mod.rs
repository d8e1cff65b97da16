//! Auth feature slice: the sign-up and login screens.
//!
//! - `state.rs`: form state and focus order
//! - `update.rs`: key handling and result processing
//! - `render.rs`: screen rendering

mod render;
mod state;
mod update;

pub use render::{render_login, render_signup};
pub use state::{LoginFocus, LoginState, SignUpFocus, SignUpState};
pub use update::{handle_login_key, handle_login_result, handle_signup_key, handle_signup_result};
