//! External funds check used by policy purchase
//!
//! Buyer balances live outside the ledger. The ledger only asks whether a
//! buyer can pay a given amount.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use haven_core::{Amount, Identity};

/// Source of truth for buyer balances outside the ledger
pub trait FundsSource {
    /// Check if `who` can pay `amount`
    fn has_sufficient_funds(&self, who: &Identity, amount: Amount) -> bool;
}

impl<F> FundsSource for F
where
    F: Fn(&Identity, Amount) -> bool,
{
    fn has_sufficient_funds(&self, who: &Identity, amount: Amount) -> bool {
        self(who, amount)
    }
}

/// Simple map of known balances; unknown identities hold nothing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletBalances {
    balances: BTreeMap<Identity, Amount>,
}

impl WalletBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the balance of `who`
    pub fn set(&mut self, who: Identity, amount: Amount) {
        self.balances.insert(who, amount);
    }

    /// Builder-style variant of [`WalletBalances::set`]
    pub fn with(mut self, who: impl Into<Identity>, amount: Amount) -> Self {
        self.set(who.into(), amount);
        self
    }

    /// Balance of `who` (zero when unknown)
    pub fn balance_of(&self, who: &Identity) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }
}

impl FundsSource for WalletBalances {
    fn has_sufficient_funds(&self, who: &Identity, amount: Amount) -> bool {
        self.balance_of(who) >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_balances() {
        let wallets = WalletBalances::new().with("0x123", 1_000);

        assert!(wallets.has_sufficient_funds(&Identity::new("0x123"), 1_000));
        assert!(!wallets.has_sufficient_funds(&Identity::new("0x123"), 1_001));
        assert!(!wallets.has_sufficient_funds(&Identity::new("0x456"), 1));
        assert!(wallets.has_sufficient_funds(&Identity::new("0x456"), 0));
    }

    #[test]
    fn test_closure_source() {
        let always = |_: &Identity, _: Amount| true;
        assert!(always.has_sufficient_funds(&Identity::new("anyone"), Amount::MAX));
    }
}
