use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statement_client::{DEFAULT_BASE_URL, HttpStatementApi};
use statement_core::DEFAULT_BANK;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub base_url: String,
    /// Bank selector sent with uploads
    pub bank: String,
    /// Per-request timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing-subscriber filter, overridden by RUST_LOG
    pub filter: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bank: DEFAULT_BANK.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "statement=info,statement_client=info".to_string(),
        }
    }
}

impl Config {
    /// Apply command-line overrides.
    pub fn with_overrides(mut self, base_url: Option<String>, bank: Option<String>) -> Self {
        if let Some(u) = base_url {
            self.server.base_url = u;
        }
        if let Some(b) = bank {
            self.server.bank = b;
        }
        self
    }

    pub fn api(&self) -> Result<HttpStatementApi> {
        let timeout = self.server.timeout_secs.map(Duration::from_secs);
        HttpStatementApi::with_timeout(self.server.base_url.clone(), timeout).context("build http client")
    }
}

/// Missing file means all defaults.
pub fn load_config(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(p: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))
}

/// Write the defaults to `p` unless a file is already there.
/// Returns whether anything was written.
pub fn init_config(p: &Path) -> Result<bool> {
    if p.exists() {
        return Ok(false);
    }
    save_config(p, &Config::default())?;
    Ok(true)
}
