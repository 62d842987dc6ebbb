//! File logging

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::APP_DIR;

/// Filter directives, e.g. `debug` or `lab_dashboard_core=trace`.
pub const LOG_ENV: &str = "LAB_DASHBOARD_LOG";
const LOG_FILE: &str = "lab-dashboard.log";

/// `<config dir>/lab-dashboard/lab-dashboard.log`, or the current directory
/// when the platform has no config dir.
pub fn log_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LOG_FILE)
}

/// Install the global subscriber. `log` records from the library crates are
/// forwarded through the subscriber's log bridge.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path();
    install(&path)?;
    Ok(path)
}

fn install(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .context("logging is already initialised")?;
    Ok(())
}
