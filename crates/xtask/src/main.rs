use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "FamilyConnect maintainer tasks")]
struct Cli {
    #[command(subcommand)]
    command: Option<CommandName>,
}

#[derive(Debug, Default, Subcommand)]
enum CommandName {
    /// Update default_config.toml by running `famconnect config generate`.
    #[default]
    UpdateDefaultConfig,
    /// Fail if default_config.toml is out of date.
    CheckDefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        CommandName::UpdateDefaultConfig => update_default_config(),
        CommandName::CheckDefaultConfig => check_default_config(),
    }
}

fn update_default_config() -> Result<()> {
    let root = project_root()?;
    let dest = default_config_path(&root);
    let generated = generate_config(&root)?;

    fs::write(&dest, generated).with_context(|| format!("write config to {}", dest.display()))?;

    println!("Updated {}", dest.display());
    Ok(())
}

fn check_default_config() -> Result<()> {
    let root = project_root()?;
    let dest = default_config_path(&root);
    let generated = generate_config(&root)?;
    let current =
        fs::read_to_string(&dest).with_context(|| format!("read {}", dest.display()))?;

    if current != generated {
        bail!(
            "{} is out of date; run `cargo run -p xtask -- update-default-config`",
            dest.display()
        );
    }

    println!("{} is up to date", dest.display());
    Ok(())
}

/// Runs `famconnect config generate` against an empty home directory.
fn generate_config(root: &Path) -> Result<String> {
    let temp_dir = tempfile::tempdir().context("create temp dir for FAMCONNECT_HOME")?;

    let output = Command::new("cargo")
        .current_dir(root)
        .env("FAMCONNECT_HOME", temp_dir.path())
        .arg("run")
        .arg("-p")
        .arg("famconnect")
        .arg("--")
        .arg("config")
        .arg("generate")
        .output()
        .context("run `cargo run -p famconnect -- config generate`")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("config generate failed: {}", stderr);
    }

    String::from_utf8(output.stdout).context("config generate printed invalid UTF-8")
}

fn default_config_path(root: &Path) -> PathBuf {
    root.join("crates")
        .join("famconnect-core")
        .join("default_config.toml")
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .nth(2)
        .context("locate workspace root from CARGO_MANIFEST_DIR")?;
    Ok(root.to_path_buf())
}
