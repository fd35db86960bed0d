use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `zen.log` in the data directory; the terminal
/// belongs to the UI. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "zen", "zen") else {
        return Ok(None);
    };
    let data_dir = proj_dirs.data_dir();
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join("zen.log");

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}
