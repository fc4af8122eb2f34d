//! Administrative parameters
//!
//! Holds the insurance fee and claim payout amount. Writes go through the
//! owner guard; reads are open to everyone.

use serde::{Deserialize, Serialize};
use tracing::info;

use haven_core::{Amount, Identity, Result};

use crate::access::AccessControl;

/// Snapshot of the administrative parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigParams {
    /// Identity allowed to change parameters and withdraw funds
    pub owner: Identity,

    /// Premium charged per policy
    pub insurance_fee: Amount,

    /// Payout per accepted claim
    pub claim_amount: Amount,
}

/// Owner-gated parameter store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStore {
    access: AccessControl,
    insurance_fee: Amount,
    claim_amount: Amount,
}

impl ConfigStore {
    /// Create a store with a fixed owner and initial parameters
    pub fn new(owner: Identity, insurance_fee: Amount, claim_amount: Amount) -> Self {
        Self {
            access: AccessControl::new(owner),
            insurance_fee,
            claim_amount,
        }
    }

    /// Owner guard shared with the withdrawal path
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn owner(&self) -> &Identity {
        self.access.owner()
    }

    pub fn insurance_fee(&self) -> Amount {
        self.insurance_fee
    }

    pub fn claim_amount(&self) -> Amount {
        self.claim_amount
    }

    /// Current parameters as a plain value
    pub fn params(&self) -> ConfigParams {
        ConfigParams {
            owner: self.owner().clone(),
            insurance_fee: self.insurance_fee,
            claim_amount: self.claim_amount,
        }
    }

    /// Set the premium charged for new policies
    pub fn update_insurance_fee(&mut self, caller: &Identity, new_fee: Amount) -> Result<()> {
        self.access.authorize(caller, "insurance fee update")?;

        info!("Insurance fee changed {} -> {}", self.insurance_fee, new_fee);
        self.insurance_fee = new_fee;

        Ok(())
    }

    /// Set the payout for future claims
    pub fn update_claim_amount(&mut self, caller: &Identity, new_amount: Amount) -> Result<()> {
        self.access.authorize(caller, "claim amount update")?;

        info!("Claim amount changed {} -> {}", self.claim_amount, new_amount);
        self.claim_amount = new_amount;

        Ok(())
    }
}
