use crate::effect::{parse_hex_color, ConfettiSettings};
use crate::error::{GiftboxError, Result};
use crate::prize::{default_prizes, Prize};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    pub prizes: Vec<Prize>,
    pub reveal_delay_ms: u64,
    pub celebration_title: String,
    pub failure_title: String,
    pub confetti: ConfettiSettings,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            prizes: default_prizes(),
            reveal_delay_ms: 800,
            celebration_title: "Happy New Year!".to_string(),
            failure_title: "Oh, what a pity!".to_string(),
            confetti: ConfettiSettings::default(),
        }
    }
}

impl LotteryConfig {
    pub fn with_prizes(prizes: Vec<Prize>) -> Self {
        Self {
            prizes,
            ..Self::default()
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prizes.is_empty() {
            return Err(GiftboxError::config("Prize pool cannot be empty"));
        }

        if let Some(index) = self.prizes.iter().position(|p| p.label.trim().is_empty()) {
            return Err(GiftboxError::config(format!(
                "Prize {} has an empty label",
                index
            )));
        }

        if self.celebration_title.is_empty() || self.failure_title.is_empty() {
            return Err(GiftboxError::config("Panel titles cannot be empty"));
        }

        if self.confetti.particle_count == 0 {
            return Err(GiftboxError::config(
                "Particle count must be greater than 0",
            ));
        }

        if self.confetti.colors.is_empty() {
            return Err(GiftboxError::config("Confetti palette cannot be empty"));
        }

        if let Some(color) = self
            .confetti
            .colors
            .iter()
            .find(|c| parse_hex_color(c).is_none())
        {
            return Err(GiftboxError::config(format!(
                "Confetti color '{}' is not #rrggbb",
                color
            )));
        }

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
