use crate::strategy::{DEFAULT_PAD, DEFAULT_START};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".renbatch";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// First number used by `seq` when `--start` is not given
    #[serde(default = "default_start")]
    pub start: u64,

    /// Minimum counter width used by `seq` when `--pad` is not given
    #[serde(default = "default_pad")]
    pub pad: usize,

    /// Default preview format: "lines", "table" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Append a run log here
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            pad: default_pad(),
            preview_format: default_preview(),
            use_color: None,
            log_file: None,
        }
    }
}

fn default_start() -> u64 {
    DEFAULT_START
}

fn default_pad() -> usize {
    DEFAULT_PAD
}

fn default_preview() -> String {
    "lines".to_string()
}

impl Config {
    /// Load config from .renbatch/config.toml in the working directory if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
