use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Send tracing output to `path`. The terminal belongs to the game screen, so
/// without a log file nothing is installed and events are dropped.
pub fn init_file_logging(path: &Path, level: Level) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
