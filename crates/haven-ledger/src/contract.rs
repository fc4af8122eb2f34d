//! The insurance contract state and its public operations
//!
//! `InsuranceContract` owns the configuration, the treasury and the policy
//! registry. The surrounding environment sequences calls and supplies the
//! caller identity and height through [`CallContext`]; each call either
//! applies every effect or returns an [`ErrorCode`] with nothing changed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use haven_core::{
    Amount, CallContext, CoverageReport, ErrorCode, Height, Identity, Policy, PolicyStatus,
    Result, DEFAULT_CLAIM_AMOUNT, DEFAULT_INSURANCE_FEE,
};

use crate::claims::ClaimProcessor;
use crate::config::{ConfigParams, ConfigStore};
use crate::funds::FundsSource;
use crate::registry::PolicyRegistry;
use crate::treasury::TreasuryLedger;

/// Deployment parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    /// Fixed owner identity
    pub owner: Identity,

    /// Initial premium
    #[serde(default = "default_insurance_fee")]
    pub insurance_fee: Amount,

    /// Initial claim payout
    #[serde(default = "default_claim_amount")]
    pub claim_amount: Amount,

    /// Funds placed in the treasury at deployment
    #[serde(default)]
    pub initial_treasury: Amount,
}

fn default_insurance_fee() -> Amount {
    DEFAULT_INSURANCE_FEE
}

fn default_claim_amount() -> Amount {
    DEFAULT_CLAIM_AMOUNT
}

impl Genesis {
    /// Default parameters for the given owner
    pub fn new(owner: impl Into<Identity>) -> Self {
        Self {
            owner: owner.into(),
            insurance_fee: DEFAULT_INSURANCE_FEE,
            claim_amount: DEFAULT_CLAIM_AMOUNT,
            initial_treasury: 0,
        }
    }
}

/// Combined ledger state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceContract {
    config: ConfigStore,
    treasury: TreasuryLedger,
    registry: PolicyRegistry,
}

impl InsuranceContract {
    /// Deploy a new contract
    pub fn new(genesis: Genesis) -> Self {
        info!(
            "Deploying insurance ledger (owner {}, fee {}, claim {}, treasury {})",
            genesis.owner, genesis.insurance_fee, genesis.claim_amount, genesis.initial_treasury
        );

        Self {
            config: ConfigStore::new(genesis.owner, genesis.insurance_fee, genesis.claim_amount),
            treasury: TreasuryLedger::with_balance(genesis.initial_treasury),
            registry: PolicyRegistry::new(),
        }
    }

    // ==========================================
    // Purchase and claims
    // ==========================================

    /// Buy a policy for the caller at the current fee
    ///
    /// Fails with `InsufficientFunds` when `funds` says the caller cannot
    /// pay, and with `TreasuryOverflow` when the premium cannot be pooled.
    /// A purchase replaces any earlier policy held by the caller.
    pub fn buy_insurance(&mut self, ctx: &CallContext, funds: &impl FundsSource) -> Result<()> {
        let fee = self.config.insurance_fee();

        if !funds.has_sufficient_funds(&ctx.caller, fee) {
            debug!("Purchase by {} rejected: cannot pay {}", ctx.caller, fee);
            return Err(ErrorCode::InsufficientFunds);
        }

        if !self.treasury.can_accept(fee) {
            debug!("Purchase by {} rejected: treasury cannot pool {}", ctx.caller, fee);
            return Err(ErrorCode::TreasuryOverflow);
        }

        self.treasury.credit(fee)?;
        self.registry.issue_policy(ctx.caller.clone(), ctx.height, fee);

        Ok(())
    }

    /// File the caller's claim at the current height
    pub fn file_claim(&mut self, ctx: &CallContext) -> Result<()> {
        let claim_amount = self.config.claim_amount();

        ClaimProcessor::new(&mut self.registry, &mut self.treasury).file_claim(
            &ctx.caller,
            ctx.height,
            claim_amount,
        )?;

        Ok(())
    }

    /// Dry run of [`InsuranceContract::file_claim`]
    pub fn can_file_claim(&self, holder: &Identity, at_height: Height) -> Result<()> {
        ClaimProcessor::preview(
            &self.registry,
            &self.treasury,
            holder,
            at_height,
            self.config.claim_amount(),
        )
    }

    /// Deposit into the treasury; open to any caller
    ///
    /// The depositor must be able to pay `amount` according to `funds`,
    /// otherwise `InsufficientFunds` is returned and nothing changes. A
    /// deposit the treasury cannot pool fails with `TreasuryOverflow`.
    pub fn fund_treasury(
        &mut self,
        caller: &Identity,
        amount: Amount,
        funds: &impl FundsSource,
    ) -> Result<()> {
        if !funds.has_sufficient_funds(caller, amount) {
            debug!("Deposit by {} rejected: cannot pay {}", caller, amount);
            return Err(ErrorCode::InsufficientFunds);
        }

        if !self.treasury.can_accept(amount) {
            debug!("Deposit by {} rejected: treasury cannot pool {}", caller, amount);
            return Err(ErrorCode::TreasuryOverflow);
        }

        self.treasury.credit(amount)?;

        info!("Treasury funded with {} by {}", amount, caller);

        Ok(())
    }

    // ==========================================
    // Administration
    // ==========================================

    pub fn update_insurance_fee(&mut self, caller: &Identity, new_fee: Amount) -> Result<()> {
        self.config.update_insurance_fee(caller, new_fee)
    }

    pub fn update_claim_amount(&mut self, caller: &Identity, new_amount: Amount) -> Result<()> {
        self.config.update_claim_amount(caller, new_amount)
    }

    /// Withdraw pooled funds to the owner
    ///
    /// Non-owners get `Unauthorized`; an amount above the balance gets
    /// `ExcessWithdrawalDenied`.
    pub fn withdraw_excess_funds(&mut self, caller: &Identity, amount: Amount) -> Result<()> {
        self.config.access().authorize(caller, "withdrawal")?;

        self.treasury.debit(amount).map_err(|_| {
            debug!(
                "Withdrawal of {} denied, treasury holds {}",
                amount,
                self.treasury.balance()
            );
            ErrorCode::ExcessWithdrawalDenied
        })?;

        info!(
            "Owner withdrew {}, treasury now {}",
            amount,
            self.treasury.balance()
        );

        Ok(())
    }

    // ==========================================
    // Queries
    // ==========================================

    pub fn has_valid_policy(&self, holder: &Identity, at_height: Height) -> bool {
        self.registry.is_valid(holder, at_height)
    }

    pub fn has_filed_claim(&self, holder: &Identity) -> bool {
        self.registry.has_claimed(holder)
    }

    pub fn get_contract_balance(&self) -> Amount {
        self.treasury.balance()
    }

    pub fn get_insurance_fee(&self) -> Amount {
        self.config.insurance_fee()
    }

    pub fn get_claim_amount(&self) -> Amount {
        self.config.claim_amount()
    }

    pub fn get_owner(&self) -> &Identity {
        self.config.owner()
    }

    pub fn get_policy(&self, holder: &Identity) -> Option<&Policy> {
        self.registry.get(holder)
    }

    pub fn policy_status(&self, holder: &Identity, at_height: Height) -> Option<PolicyStatus> {
        self.registry.status(holder, at_height)
    }

    /// Coverage summary for display
    pub fn coverage_report(&self, holder: &Identity, at_height: Height) -> Option<CoverageReport> {
        self.registry
            .get(holder)
            .map(|p| CoverageReport::from_policy(p, at_height))
    }

    pub fn params(&self) -> ConfigParams {
        self.config.params()
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn treasury(&self) -> &TreasuryLedger {
        &self.treasury
    }
}
