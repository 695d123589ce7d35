//! Tracing setup for the CLI.
//!
//! Runs log to `$XDG_STATE_HOME/chanfetch/chanfetch.log` so that long,
//! paced download sessions leave a record after the terminal is gone. The
//! terminal itself only shows the progress bar and summary lines.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,chanfetch=debug,chanfetch_core=debug";

const LOG_FILE_NAME: &str = "chanfetch.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Location of the run log, creating its directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("chanfetch")?;
    let dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    Ok(dir.join(LOG_FILE_NAME))
}

/// Install the file subscriber (append, no ANSI) and return the log path.
/// On error nothing is installed and the caller may use [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    tracing::info!("chanfetch {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(path)
}

/// Stderr-only fallback. A no-op if a subscriber is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
