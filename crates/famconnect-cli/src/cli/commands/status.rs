//! Status command: session, preferences and stored account at a glance.

use anyhow::Result;
use famconnect_core::AppContext;
use famconnect_core::config::paths;
use famconnect_core::logging;
use famconnect_core::secrets::SECRET_MASK;

pub fn run(ctx: &AppContext) -> Result<()> {
    let route = ctx.initial_route()?;
    let secrets = ctx.auth.secrets();
    let stored = secrets.retrieve()?;

    println!("Home:            {}", paths::famconnect_home().display());
    println!("Start screen:    {}", route.title());
    println!("Logged in:       {}", yes_no(ctx.session.logged_in()));
    println!("Stay logged in:  {}", yes_no(ctx.session.stay_signed_in()));
    println!("Secret backend:  {}", secrets.describe());
    match (&stored.username, &stored.password) {
        (Some(username), Some(_)) => {
            println!("Account:         {username}");
            println!("Password:        {SECRET_MASK}");
            if let Some(updated_at) = secrets.updated_at()? {
                println!("Saved at:        {}", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        _ => println!("Account:         none (run `famconnect signup`)"),
    }
    if ctx.config.logging.file {
        println!("Log file:        {}", logging::log_file_path().display());
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
