//! Session configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_TICK_MS, RESPAWN_DELAY_MS};

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick length must be between 1 and 1000 ms, got {0}")]
    TickLength(u64),

    #[error("respawn delay must be positive when respawning is enabled")]
    RespawnDelay,
}

/// Engine configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed of the engine's random number generator.
    pub seed: u64,
    /// Length of one `tick()` in milliseconds.
    pub tick_ms: u64,
    /// Respawn after death instead of ending the round.
    pub respawn_on_death: bool,
    pub respawn_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_ms: DEFAULT_TICK_MS,
            respawn_on_death: true,
            respawn_delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > 1000 {
            return Err(ConfigError::TickLength(self.tick_ms));
        }
        if self.respawn_on_death && self.respawn_delay_ms == 0 {
            return Err(ConfigError::RespawnDelay);
        }
        Ok(())
    }
}
