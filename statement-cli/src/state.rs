//! Files kept under ~/.statement-processor

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DIR_NAME: &str = ".statement-processor";

#[derive(Debug, Clone, PartialEq)]
pub struct AppHome {
    root: PathBuf,
}

impl AppHome {
    /// Resolve from $HOME. Nothing is created until [`AppHome::ensure`].
    pub fn from_env() -> Result<Self> {
        let home = std::env::var_os("HOME").context("HOME is not set")?;
        Ok(Self::under(Path::new(&home)))
    }

    pub fn under(home: &Path) -> Self {
        Self {
            root: home.join(DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure(&self) -> Result<&Self> {
        fs::create_dir_all(&self.root).with_context(|| format!("create {}", self.root.display()))?;
        Ok(self)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("statement.log")
    }
}
