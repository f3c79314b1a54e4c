//! TOML settings for the command line front-end.
//!
//! Settings name the deployed contract and the chain it lives on. They can
//! be loaded from a file and overridden from the environment, so the same
//! binary serves testnet and mainnet deployments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ContractRef;
use crate::dispatch::GAS_LIMIT;
use crate::types::NATIVE_DENOM;

/// Environment variable overriding the contract address
pub const ENV_CONTRACT_ADDRESS: &str = "PIXSECRET_CONTRACT_ADDRESS";

/// Environment variable overriding the contract code hash
pub const ENV_CODE_HASH: &str = "PIXSECRET_CODE_HASH";

/// Default chain (Secret Network testnet)
pub const DEFAULT_CHAIN_ID: &str = "pulsar-2";

/// Default LCD endpoint for [`DEFAULT_CHAIN_ID`]
pub const DEFAULT_LCD_URL: &str = "https://api.pulsar.scrttestnet.com";

/// Length of a contract code hash in bytes
const CODE_HASH_LEN: usize = 32;

/// Settings file contents
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Chain identifier
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    /// LCD endpoint
    #[serde(default = "default_lcd_url")]
    pub lcd_url: String,
    /// Deployed contract address
    #[serde(default)]
    pub contract_address: String,
    /// Hex code hash of the deployed contract
    #[serde(default)]
    pub code_hash: String,
    /// Gas ceiling for transactions (default: 100,000)
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    /// Denomination used for payments (default: uscrt)
    #[serde(default = "default_denom")]
    pub denom: String,
}

fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

fn default_lcd_url() -> String {
    DEFAULT_LCD_URL.to_string()
}

fn default_gas_limit() -> u64 {
    GAS_LIMIT
}

fn default_denom() -> String {
    NATIVE_DENOM.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            lcd_url: default_lcd_url(),
            contract_address: String::new(),
            code_hash: String::new(),
            gas_limit: default_gas_limit(),
            denom: default_denom(),
        }
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML could not be parsed or written
    #[error("parse error: {0}")]
    Parse(String),
    /// Contract address not configured
    #[error("contract address is not set (set PIXSECRET_CONTRACT_ADDRESS or the settings file)")]
    MissingContractAddress,
    /// Code hash is not 32 bytes of hex
    #[error("invalid code hash: {0}")]
    InvalidCodeHash(String),
    /// Gas limit of zero
    #[error("gas limit must be greater than zero")]
    ZeroGasLimit,
}

impl Settings {
    /// Load from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save to a TOML file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default settings path (`~/.pixsecret/config.toml`)
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pixsecret")
            .join("config.toml")
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (empty values are ignored)
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(address) = lookup(ENV_CONTRACT_ADDRESS).filter(|v| !v.is_empty()) {
            self.contract_address = address;
        }
        if let Some(hash) = lookup(ENV_CODE_HASH).filter(|v| !v.is_empty()) {
            self.code_hash = hash;
        }
        self
    }

    /// Check that the settings describe a usable contract
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_empty() {
            return Err(ConfigError::MissingContractAddress);
        }

        let bytes = hex::decode(&self.code_hash)
            .map_err(|e| ConfigError::InvalidCodeHash(e.to_string()))?;
        if bytes.len() != CODE_HASH_LEN {
            return Err(ConfigError::InvalidCodeHash(format!(
                "expected {} bytes, got {}",
                CODE_HASH_LEN,
                bytes.len()
            )));
        }

        if self.gas_limit == 0 {
            return Err(ConfigError::ZeroGasLimit);
        }
        Ok(())
    }

    /// Contract described by these settings
    #[must_use]
    pub fn contract(&self) -> ContractRef {
        ContractRef::new(self.contract_address.clone(), self.code_hash.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    const HASH: &str = "af74387e276be8874f07bec3a87023ee49b0e7ebe08178c49d0a49c3c98ed60e";

    fn configured() -> Settings {
        Settings {
            contract_address: "secret1contract".to_string(),
            code_hash: HASH.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_defaults_from_empty_file() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.chain_id, "pulsar-2");
        assert_eq!(settings.gas_limit, 100_000);
        assert_eq!(settings.denom, "uscrt");
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = configured();
        let path = temp_dir().join(format!(
            "pixsecret_test_settings_{}.toml",
            std::process::id()
        ));
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().apply_overrides(|key| match key {
            ENV_CONTRACT_ADDRESS => Some("secret1override".to_string()),
            ENV_CODE_HASH => Some(String::new()),
            _ => None,
        });
        assert_eq!(settings.contract_address, "secret1override");
        assert!(settings.code_hash.is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(configured().validate().is_ok());

        assert!(matches!(
            Settings::default().validate(),
            Err(ConfigError::MissingContractAddress)
        ));

        let short = Settings {
            code_hash: "abcd".to_string(),
            ..configured()
        };
        assert!(matches!(
            short.validate(),
            Err(ConfigError::InvalidCodeHash(_))
        ));

        let no_gas = Settings {
            gas_limit: 0,
            ..configured()
        };
        assert!(matches!(no_gas.validate(), Err(ConfigError::ZeroGasLimit)));
    }

    #[test]
    fn test_contract_ref() {
        let contract = configured().contract();
        assert_eq!(contract.address, "secret1contract");
        assert_eq!(contract.code_hash, HASH);
    }
}
