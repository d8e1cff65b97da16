//! Interactive shell command.

use anyhow::Result;
use famconnect_core::AppContext;

#[cfg(feature = "tui")]
pub fn run(ctx: AppContext) -> Result<()> {
    famconnect_tui::run_shell(ctx)
}

#[cfg(not(feature = "tui"))]
pub fn run(ctx: AppContext) -> Result<()> {
    let _ = ctx;
    anyhow::bail!("This build has no interactive shell. Rebuild with the `tui` feature.")
}
