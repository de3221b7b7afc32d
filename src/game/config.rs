use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable rule parameters. Every field has a default, so a JSON file only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub bank_trade_amount: u32,
    pub general_port_trade_amount: u32,
    pub resource_port_trade_amount: u32,
    pub max_cards: u32,
    pub max_dev_cards_per_round: u32,
    pub max_settlements: usize,
    pub max_cities: usize,
    pub max_roads: usize,
    pub target_points: u32,
    pub points_per_settlement: u32,
    pub points_per_city: u32,
    pub points_for_most_knights: u32,
    pub points_for_longest_road: u32,
    pub most_knights_minimum: u32,
    pub longest_road_minimum: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bank_trade_amount: 4,
            general_port_trade_amount: 3,
            resource_port_trade_amount: 2,
            max_cards: 7,
            max_dev_cards_per_round: 1,
            max_settlements: 5,
            max_cities: 4,
            max_roads: 15,
            target_points: 10,
            points_per_settlement: 1,
            points_per_city: 2,
            points_for_most_knights: 2,
            points_for_longest_road: 2,
            most_knights_minimum: 3,
            longest_road_minimum: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bank_trade_amount == 0
            || self.general_port_trade_amount == 0
            || self.resource_port_trade_amount == 0
        {
            return Err(ConfigError::Invalid("trade rates must be positive"));
        }
        if self.target_points == 0 {
            return Err(ConfigError::Invalid("target points must be positive"));
        }
        if self.max_settlements < 2 || self.max_roads < 2 {
            return Err(ConfigError::Invalid("setup needs two settlements and two roads"));
        }
        Ok(())
    }
}
