//! Agent configuration
//!
//! Everything the owner can tune, in one serde-friendly struct. Value types
//! (`ConversionPath`, `ConversionRate`, `Address`) validate themselves while
//! deserializing; [`AgentConfig::validate`] covers the cross-field rules.

use serde::{Deserialize, Serialize};
use std::path::Path;
use types::ids::Address;
use types::numeric::ConversionRate;
use types::path::ConversionPath;

use crate::errors::ConfigError;
use crate::exchange::{Gas, DEFAULT_CONVERSION_GAS_LIMIT};

/// Construction-time configuration of a conversion agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Route from native currency to the target asset.
    pub conversion_path: ConversionPath,
    /// Receiver of converted and recovered funds.
    pub destination_wallet: Address,
    /// Registry contract resolving the exchange backend.
    pub registry: Address,
    /// Minimum acceptable output units per input unit.
    #[serde(default)]
    pub min_conversion_rate: ConversionRate,
    /// Budget handed to the exchange backend (default 300k).
    #[serde(default = "default_gas_limit")]
    pub conversion_gas_limit: Gas,
}

fn default_gas_limit() -> Gas {
    DEFAULT_CONVERSION_GAS_LIMIT
}

impl AgentConfig {
    /// Create a config with the default gas limit.
    pub fn new(
        conversion_path: ConversionPath,
        destination_wallet: Address,
        registry: Address,
        min_conversion_rate: ConversionRate,
    ) -> Self {
        Self {
            conversion_path,
            destination_wallet,
            registry,
            min_conversion_rate,
            conversion_gas_limit: DEFAULT_CONVERSION_GAS_LIMIT,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: Gas) -> Self {
        self.conversion_gas_limit = gas_limit;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destination_wallet.is_zero() {
            return Err(ConfigError::ZeroDestination);
        }
        if self.registry.is_zero() {
            return Err(ConfigError::ZeroRegistry);
        }
        if self.conversion_gas_limit == 0 {
            return Err(ConfigError::ZeroGasLimit);
        }
        Ok(())
    }
}
