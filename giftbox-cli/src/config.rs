use anyhow::Context;
use giftbox_core::LotteryConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub config_path: PathBuf,
    pub verbose: bool,
}

impl CliConfig {
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(default_config_path),
            verbose,
        }
    }

    /// Missing file means built-in defaults
    pub fn load_lottery(&self) -> anyhow::Result<LotteryConfig> {
        load_lottery_config(&self.config_path)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giftbox")
        .join("config.json")
}

pub fn load_lottery_config(path: &Path) -> anyhow::Result<LotteryConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(LotteryConfig::default());
    }

    let config = LotteryConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!("Loaded {} prizes from {}", config.prizes.len(), path.display());
    Ok(config)
}
