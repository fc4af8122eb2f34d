//! Haven Core - Shared types, policy windows, and error codes
//!
//! This crate provides the foundational types for the Haven insurance
//! ledger: caller identities, logical heights, policy records and the
//! stable numeric error codes returned by every ledger operation.

pub mod coverage;
pub mod error;
pub mod policy;
pub mod types;

pub use coverage::CoverageReport;
pub use error::{ErrorCode, Result};
pub use policy::{Policy, PolicyStatus};
pub use types::{Amount, CallContext, Height, Identity};

/// Heights that must pass after purchase before a claim may be filed
pub const CLAIM_WAITING_PERIOD: Height = 144;

/// Heights a policy stays valid after purchase (one year at 144 per day)
pub const POLICY_DURATION: Height = 52_560;

/// Premium charged at deployment unless configured otherwise
pub const DEFAULT_INSURANCE_FEE: Amount = 1_000;

/// Claim payout at deployment unless configured otherwise
pub const DEFAULT_CLAIM_AMOUNT: Amount = 5_000;

/// Warning threshold in heights before a policy expires
pub const EXPIRY_WARNING_HEIGHTS: Height = 1_008;
