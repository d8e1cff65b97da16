//! Full-screen terminal shell for FamilyConnect.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use famconnect_core::AppContext;
pub use features::{auth, dashboard, welcome};
pub use runtime::ShellRuntime;

/// Runs the interactive shell until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub fn run_shell(ctx: AppContext) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The shell requires a terminal.\n\
             Use `famconnect signup`, `famconnect login` or `famconnect status` for scripted use."
        );
    }

    let mut runtime = ShellRuntime::new(ctx)?;
    runtime.run()
}
