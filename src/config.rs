use crate::domain::{Address, PositionDescriptor};
use crate::valuation::USD_FRACTION_DIGITS;
use std::collections::HashMap;
use thiserror::Error;

/// Leaves ten integer digits of a 28-digit USD value at full precision.
const MAX_FRACTION_DIGITS: u32 = 18;

#[derive(Debug, Clone)]
pub struct Config {
    pub positions: Vec<PositionDescriptor>,
    pub auxiliary_contract: Option<Address>,
    pub usd_fraction_digits: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            positions: Vec::new(),
            auxiliary_contract: None,
            usd_fraction_digits: USD_FRACTION_DIGITS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let positions = parse_positions_from_map(&env_map)?;

        let auxiliary_contract = env_map
            .get("AUXILIARY_CONTRACT")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Address::new);

        let usd_fraction_digits = env_map
            .get("USD_FRACTION_DIGITS")
            .map(|s| s.as_str())
            .unwrap_or("6")
            .parse::<u32>()
            .ok()
            .filter(|digits| *digits <= MAX_FRACTION_DIGITS)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "USD_FRACTION_DIGITS".to_string(),
                    format!("must be an integer between 0 and {}", MAX_FRACTION_DIGITS),
                )
            })?;

        Ok(Config {
            positions,
            auxiliary_contract,
            usd_fraction_digits,
        })
    }
}

fn parse_positions_from_map(
    env_map: &HashMap<String, String>,
) -> Result<Vec<PositionDescriptor>, ConfigError> {
    let Some(file_path) = env_map.get("POSITIONS_FILE") else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(file_path).map_err(|_| {
        ConfigError::InvalidValue(
            "POSITIONS_FILE".to_string(),
            "file not found or unreadable".to_string(),
        )
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ConfigError::InvalidValue(
            "POSITIONS_FILE".to_string(),
            format!("invalid position list: {}", e),
        )
    })
}
