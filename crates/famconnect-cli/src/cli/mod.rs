//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use famconnect_core::config::Config;
use famconnect_core::{AppContext, logging};

mod commands;

#[derive(Parser)]
#[command(name = "famconnect")]
#[command(version)]
#[command(about = "FamilyConnect: stay close to the people who matter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account (password and confirmation are read from stdin)
    Signup {
        /// Username to register
        #[arg(short, long)]
        username: String,

        /// Contact email (collected, not used for login)
        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Log in with the stored account (password is read from stdin)
    Login {
        /// Username to log in as
        #[arg(short, long)]
        username: String,

        /// Keep the session across restarts
        #[arg(long)]
        stay_signed_in: bool,
    },

    /// Log out and forget the "stay logged in" choice
    Logout,

    /// Show session and stored-account status
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands work without a readable config or log directory.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        };
    }

    let config = Config::load().context("load config")?;
    let _log_guard = logging::init(&config.logging)?;
    let mut ctx = AppContext::open(config)?;

    match cli.command {
        None => commands::shell::run(ctx),
        Some(Commands::Signup { username, email }) => {
            commands::auth::signup(&ctx, &username, &email)
        }
        Some(Commands::Login {
            username,
            stay_signed_in,
        }) => commands::auth::login(&mut ctx, &username, stay_signed_in),
        Some(Commands::Logout) => commands::auth::logout(&mut ctx),
        Some(Commands::Status) => commands::status::run(&ctx),
        Some(Commands::Config { .. }) => Ok(()),
    }
}
