//! Parser configuration with documented constants
//!
//! Every tunable the event builders and aggregators consult lives here.
//! Defaults reproduce the stock rule set; a TOML file may override any subset.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::{LogError, Result};

/// Tunables for event validation and post-processing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    // === EVENT VALIDATION ===
    /// Smallest heal amount accepted from a `healed` line (inclusive)
    pub heal_min: u32,

    /// Largest heal amount accepted from a `healed` line (inclusive)
    pub heal_max: u32,

    /// Maximum length of a chat message, in characters
    pub chat_max_len: usize,

    // === DAMAGE ATTRIBUTION ===
    /// Half-width of the window around a notable event, in seconds
    ///
    /// Damage dealt within this many seconds of any kill, capture or
    /// charge deployment counts as real damage. Both edges are inclusive.
    pub real_damage_window_secs: i64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            heal_min: 1,
            heal_max: 450,
            chat_max_len: 160,
            real_damage_window_secs: 10,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; keys that are absent keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ParserConfig = toml::from_str(content)?;
        config.validate().map_err(LogError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.heal_min > self.heal_max {
            return Err(format!(
                "heal_min ({}) must be <= heal_max ({})",
                self.heal_min, self.heal_max
            ));
        }

        if self.real_damage_window_secs < 0 {
            return Err("real_damage_window_secs must not be negative".into());
        }

        if self.chat_max_len == 0 {
            return Err("chat_max_len must be positive".into());
        }

        Ok(())
    }

    /// True if `healing` is inside the accepted heal range
    pub fn accepts_heal(&self, healing: u32) -> bool {
        (self.heal_min..=self.heal_max).contains(&healing)
    }
}
