//! Game configuration
//!
//! Loaded from a JSON file; any field left out falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::powerup::SpawnRates;

/// Game setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub starting_lives: u32,
    /// RNG seed for power-up spawns
    pub seed: u64,
    pub spawn_rates: SpawnRates,
    /// Level files in menu order; empty uses the built-in levels
    pub levels: Vec<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            starting_lives: STARTING_LIVES,
            seed: 0,
            spawn_rates: SpawnRates::default(),
            levels: Vec::new(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.field_width.is_finite() || self.field_width <= PADDLE_SIZE.x {
            return Err(format!("field_width must be finite and > {}", PADDLE_SIZE.x));
        }
        if !self.field_height.is_finite() || self.field_height <= PADDLE_SIZE.y {
            return Err(format!("field_height must be finite and > {}", PADDLE_SIZE.y));
        }
        if self.starting_lives == 0 {
            return Err("starting_lives must be > 0".to_string());
        }
        if self.spawn_rates.good == 0 || self.spawn_rates.bad == 0 {
            return Err("spawn rates must be > 0".to_string());
        }
        Ok(())
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let config =
            Self::from_json(&json).map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{}; using default config", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "spawn_rates": { "good": 10, "bad": 3 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.spawn_rates, SpawnRates { good: 10, bad: 3 });
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.starting_lives, STARTING_LIVES);
        assert!(config.levels.is_empty());
    }

    #[test]
    fn zero_rate_invalid() {
        let mut config = GameConfig::default();
        config.spawn_rates.bad = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_lives_invalid() {
        let mut config = GameConfig::default();
        config.starting_lives = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn narrow_field_invalid() {
        let mut config = GameConfig::default();
        config.field_width = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let config = GameConfig::load_or_default(Path::new("/nonexistent/brickfall.json"));
        assert_eq!(config.seed, 0);
        assert_eq!(config.field_height, FIELD_HEIGHT);
    }
}
