//! Ledger state snapshot storage
//!
//! The host binary keeps the contract state as a JSON snapshot between
//! invocations. Writes go to a temp file first, then rename. A snapshot
//! whose treasury totals disagree with its balance is refused on load.

use std::path::PathBuf;

use crate::contract::{Genesis, InsuranceContract};
use crate::error::{LedgerError, Result};

/// Snapshot storage rooted at a data directory
pub struct LedgerStorage {
    /// Base path for storage
    base_path: PathBuf,
}

impl LedgerStorage {
    /// Create a new storage instance
    pub fn new(base_path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Check if a contract has been deployed here
    pub fn has_contract(&self) -> bool {
        self.state_path().exists()
    }

    /// Deploy a fresh contract and save it
    pub fn initialize(&self, genesis: Genesis) -> Result<InsuranceContract> {
        if self.has_contract() {
            return Err(LedgerError::AlreadyInitialized(
                self.state_path().display().to_string(),
            ));
        }

        let contract = InsuranceContract::new(genesis);
        self.save_contract(&contract)?;
        Ok(contract)
    }

    /// Load contract state
    pub fn load_contract(&self) -> Result<InsuranceContract> {
        let path = self.state_path();
        if !path.exists() {
            return Err(LedgerError::NotInitialized);
        }

        let content = std::fs::read_to_string(&path)?;
        let contract: InsuranceContract = serde_json::from_str(&content)?;

        if !contract.treasury().is_balanced() {
            return Err(LedgerError::Serialization(format!(
                "treasury totals do not match balance in {}",
                path.display()
            )));
        }

        Ok(contract)
    }

    /// Save contract state
    pub fn save_contract(&self, contract: &InsuranceContract) -> Result<()> {
        let path = self.state_path();
        let content = serde_json::to_string_pretty(contract)?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Get path to the state snapshot
    fn state_path(&self) -> PathBuf {
        self.base_path.join("contract_state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::{CallContext, Identity};

    use crate::funds::WalletBalances;

    #[test]
    fn test_load_before_init() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LedgerStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(!storage.has_contract());
        assert!(matches!(
            storage.load_contract(),
            Err(LedgerError::NotInitialized)
        ));
    }

    #[test]
    fn test_init_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LedgerStorage::new(dir.path().join("ledger")).unwrap();

        let mut contract = storage.initialize(Genesis::new("SP000OWNER")).unwrap();
        let funds = WalletBalances::new().with("0x123", 5_000);
        contract
            .buy_insurance(&CallContext::new("0x123", 42), &funds)
            .unwrap();
        storage.save_contract(&contract).unwrap();

        let loaded = storage.load_contract().unwrap();
        assert_eq!(loaded.get_contract_balance(), contract.get_contract_balance());
        assert!(loaded.has_valid_policy(&Identity::new("0x123"), 42));
    }

    #[test]
    fn test_load_rejects_unbalanced_treasury() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LedgerStorage::new(dir.path().to_path_buf()).unwrap();
        storage
            .initialize(Genesis {
                initial_treasury: 10_000,
                ..Genesis::new("SP000OWNER")
            })
            .unwrap();

        // Edit the balance by hand, leaving the running totals alone
        let path = dir.path().join("contract_state.json");
        let mut state: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        state["treasury"]["balance"] = serde_json::json!(999_999);
        std::fs::write(&path, serde_json::to_string_pretty(&state).unwrap()).unwrap();

        assert!(matches!(
            storage.load_contract(),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn test_double_init_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LedgerStorage::new(dir.path().to_path_buf()).unwrap();

        storage.initialize(Genesis::new("SP000OWNER")).unwrap();
        assert!(matches!(
            storage.initialize(Genesis::new("SP000OTHER")),
            Err(LedgerError::AlreadyInitialized(_))
        ));
        assert_eq!(storage.load_contract().unwrap().get_owner().as_str(), "SP000OWNER");
    }
}
