//! Run logger configuration
//!
//! Parses an optional `runlog.toml` into the settings used when creating a
//! logger. Every field has a default, so an empty file is a valid config.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::log::Level;

/// Settings shared by every logger created from them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunLogConfig {
    /// Directory holding log and marker files, created if absent (default: `logs`)
    #[serde(default = "default_folder")]
    pub folder: PathBuf,
    /// Leading part of every file name (default: `run`)
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    /// Also write records to stderr (default: false)
    #[serde(default)]
    pub enable_console: bool,
    /// Color the level tag on stderr (default: false)
    #[serde(default)]
    pub console_color: bool,
    /// Records below this level are dropped (default: info)
    #[serde(default)]
    pub min_level: Level,
}

fn default_folder() -> PathBuf {
    PathBuf::from("logs")
}

fn default_filename_prefix() -> String {
    "run".to_string()
}

impl Default for RunLogConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            filename_prefix: default_filename_prefix(),
            enable_console: false,
            console_color: false,
            min_level: Level::default(),
        }
    }
}

impl RunLogConfig {
    /// Config writing to `folder` with file names starting with `filename_prefix`
    #[must_use]
    pub fn new<P: Into<PathBuf>>(folder: P, filename_prefix: &str) -> Self {
        Self {
            folder: folder.into(),
            filename_prefix: filename_prefix.to_string(),
            ..Self::default()
        }
    }

    /// Enable or disable the stderr sink
    #[must_use]
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Enable or disable level coloring on stderr
    #[must_use]
    pub fn with_console_color(mut self, enable: bool) -> Self {
        self.console_color = enable;
        self
    }

    /// Set the minimum level written
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse runlog config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.filename_prefix.trim().is_empty() {
            bail!("filename_prefix cannot be empty");
        }
        if self.folder.as_os_str().is_empty() {
            bail!("folder cannot be empty");
        }
        Ok(())
    }
}
