//! Haven Ledger - Insurance policy, claim, and treasury state machine
//!
//! This crate holds the ledger state and its operations:
//! - Policy purchase against the configured premium
//! - Time-windowed claim filing with duplicate prevention
//! - Pooled treasury custody
//! - Owner-gated fee, payout, and withdrawal administration
//!
//! Every operation runs against an [`InsuranceContract`] held by exclusive
//! reference and either applies all of its effects or none of them.

pub mod access;
pub mod claims;
pub mod config;
pub mod contract;
pub mod error;
pub mod funds;
pub mod registry;
pub mod settings;
pub mod storage;
pub mod treasury;

pub use access::AccessControl;
pub use claims::ClaimProcessor;
pub use config::{ConfigParams, ConfigStore};
pub use contract::{Genesis, InsuranceContract};
pub use error::{LedgerError, Result};
pub use funds::{FundsSource, WalletBalances};
pub use registry::PolicyRegistry;
pub use settings::LedgerSettings;
pub use storage::LedgerStorage;
pub use treasury::TreasuryLedger;
