//! Tracing subscriber setup.
//!
//! Filter resolution order:
//! 1. `FAMCONNECT_LOG` environment variable (if set)
//! 2. `[logging] level` from config
//!
//! With `[logging] file = true` events go to `<home>/logs/famconnect.log`,
//! keeping the terminal free for the full-screen UI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LoggingConfig, paths};

/// Environment variable overriding the configured filter.
pub const LOG_ENV_VAR: &str = "FAMCONNECT_LOG";

const LOG_FILE_PREFIX: &str = "famconnect";
const LOG_FILE_SUFFIX: &str = "log";

/// Where file logging writes when `[logging] file = true`.
pub fn log_file_path() -> PathBuf {
    log_file_in(&paths::logs_dir())
}

fn log_file_in(dir: &Path) -> PathBuf {
    dir.join(format!("{LOG_FILE_PREFIX}.{LOG_FILE_SUFFIX}"))
}

/// Keeps the background log writer alive; drop it to flush.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Builds the filter from the environment, falling back to config.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    let filter = build_filter(config);

    if config.file {
        let (writer, guard) = file_writer(&paths::logs_dir())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false),
            )
            .try_init()
            .context("install tracing subscriber")?;
        Ok(LogGuard {
            _worker: Some(guard),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("install tracing subscriber")?;
        Ok(LogGuard { _worker: None })
    }
}

fn file_writer(dir: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_writer_creates_log_file() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");

        let (_writer, _guard) = file_writer(&logs).unwrap();

        assert!(log_file_in(&logs).exists());
    }

    #[test]
    fn test_filter_falls_back_to_config_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: false,
        };
        // FAMCONNECT_LOG is not set by the test harness.
        if std::env::var(LOG_ENV_VAR).is_err() {
            assert_eq!(build_filter(&config).to_string(), "debug");
        }
    }
}
