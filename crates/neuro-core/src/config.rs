//! Configuration management for NeuroCleanse tools

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Global NeuroCleanse configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Length of a focus session (minutes)
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    /// Shortest task keyword that takes part in filtering
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Timer tick period (milliseconds)
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_min_keyword_len() -> usize {
    3
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            min_keyword_len: default_min_keyword_len(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Focus session length in seconds
    pub fn focus_secs(&self) -> u32 {
        self.focus_minutes.saturating_mul(60)
    }

    /// Timer tick period, never shorter than one millisecond
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}
