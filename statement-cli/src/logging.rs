use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::LogSection;
use crate::state::AppHome;

/// Send tracing output to the log file; the terminal belongs to the UI.
pub fn init_logging(home: &AppHome, cfg: &LogSection) -> Result<()> {
    let path = home.ensure()?.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.filter).with_context(|| format!("invalid log filter: {}", cfg.filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("init logging: {e}"))
}
