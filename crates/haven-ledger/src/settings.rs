//! Host settings
//!
//! Read from a TOML file such as:
//!
//! ```toml
//! data_dir = "/var/lib/haven"
//!
//! [genesis]
//! owner = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"
//! insurance_fee = 1000
//! claim_amount = 5000
//! initial_treasury = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contract::Genesis;
use crate::error::Result;

/// Settings for the ledger host binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Directory holding the contract state snapshot
    #[serde(default = "LedgerSettings::default_data_dir")]
    pub data_dir: PathBuf,

    /// Deployment parameters used by `init`
    pub genesis: Genesis,
}

impl LedgerSettings {
    /// Settings with default paths for the given owner
    pub fn new(owner: impl Into<haven_core::Identity>) -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            genesis: Genesis::new(owner),
        }
    }

    /// Platform data directory, falling back to the working directory
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("haven"))
            .unwrap_or_else(|| PathBuf::from("./haven_data"))
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Write settings as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::{DEFAULT_CLAIM_AMOUNT, DEFAULT_INSURANCE_FEE};

    #[test]
    fn test_parse_full_settings() {
        let settings = LedgerSettings::from_toml(
            r#"
            data_dir = "/tmp/haven-test"

            [genesis]
            owner = "SP000OWNER"
            insurance_fee = 250
            claim_amount = 900
            initial_treasury = 10000
            "#,
        )
        .unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("/tmp/haven-test"));
        assert_eq!(settings.genesis.owner.as_str(), "SP000OWNER");
        assert_eq!(settings.genesis.insurance_fee, 250);
        assert_eq!(settings.genesis.claim_amount, 900);
        assert_eq!(settings.genesis.initial_treasury, 10_000);
    }

    #[test]
    fn test_genesis_defaults() {
        let settings = LedgerSettings::from_toml(
            r#"
            [genesis]
            owner = "SP000OWNER"
            "#,
        )
        .unwrap();

        assert_eq!(settings.genesis.insurance_fee, DEFAULT_INSURANCE_FEE);
        assert_eq!(settings.genesis.claim_amount, DEFAULT_CLAIM_AMOUNT);
        assert_eq!(settings.genesis.initial_treasury, 0);
        assert_eq!(settings.data_dir, LedgerSettings::default_data_dir());
    }

    #[test]
    fn test_missing_owner_is_config_error() {
        let err = LedgerSettings::from_toml("[genesis]\ninsurance_fee = 1\n").unwrap_err();
        assert!(matches!(err, crate::error::LedgerError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haven.toml");

        let mut settings = LedgerSettings::new("SP000OWNER");
        settings.data_dir = dir.path().join("data");
        settings.genesis.initial_treasury = 25_000;
        settings.save(&path).unwrap();

        assert_eq!(LedgerSettings::load(&path).unwrap(), settings);
    }
}
