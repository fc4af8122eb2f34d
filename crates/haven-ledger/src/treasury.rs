//! Pooled treasury balance
//!
//! The balance never goes negative: a debit larger than the balance fails
//! before anything changes. A credit that would overflow fails the same way.
//! Running totals of credits and debits are kept so that
//! `balance == total_credited - total_debited` can be audited.

use serde::{Deserialize, Serialize};

use haven_core::{Amount, ErrorCode, Result};

/// Treasury balance and running totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryLedger {
    balance: Amount,
    total_credited: Amount,
    total_debited: Amount,
}

impl TreasuryLedger {
    /// Create an empty treasury
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a treasury seeded with an initial balance
    pub fn with_balance(initial: Amount) -> Self {
        Self {
            balance: initial,
            total_credited: initial,
            total_debited: 0,
        }
    }

    /// Current pooled balance
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Sum of every credit ever applied
    pub fn total_credited(&self) -> Amount {
        self.total_credited
    }

    /// Sum of every debit ever applied
    pub fn total_debited(&self) -> Amount {
        self.total_debited
    }

    /// Check if a debit of `amount` would succeed
    pub fn can_cover(&self, amount: Amount) -> bool {
        self.balance >= amount
    }

    /// Check if a credit of `amount` would succeed
    pub fn can_accept(&self, amount: Amount) -> bool {
        self.balance.checked_add(amount).is_some()
            && self.total_credited.checked_add(amount).is_some()
    }

    /// Add funds to the pool
    ///
    /// Fails with `TreasuryOverflow`, leaving the ledger unchanged, when
    /// the balance or the running credit total would overflow.
    pub fn credit(&mut self, amount: Amount) -> Result<()> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(ErrorCode::TreasuryOverflow)?;
        let total_credited = self
            .total_credited
            .checked_add(amount)
            .ok_or(ErrorCode::TreasuryOverflow)?;

        self.balance = balance;
        self.total_credited = total_credited;

        Ok(())
    }

    /// Remove funds from the pool
    pub fn debit(&mut self, amount: Amount) -> Result<()> {
        if !self.can_cover(amount) {
            return Err(ErrorCode::InsufficientTreasury);
        }

        self.balance -= amount;
        self.total_debited = self.total_debited.saturating_add(amount);

        Ok(())
    }

    /// Check the running totals against the balance
    pub fn is_balanced(&self) -> bool {
        self.total_credited.checked_sub(self.total_debited) == Some(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut treasury = TreasuryLedger::new();
        treasury.credit(1_000).unwrap();
        treasury.debit(400).unwrap();

        assert_eq!(treasury.balance(), 600);
        assert_eq!(treasury.total_credited(), 1_000);
        assert_eq!(treasury.total_debited(), 400);
        assert!(treasury.is_balanced());
    }

    #[test]
    fn test_overdraft_leaves_balance_unchanged() {
        let mut treasury = TreasuryLedger::with_balance(100);
        let before = treasury.clone();

        assert_eq!(treasury.debit(101), Err(ErrorCode::InsufficientTreasury));
        assert_eq!(treasury, before);
    }

    #[test]
    fn test_overflowing_credit_leaves_balance_unchanged() {
        let mut treasury = TreasuryLedger::with_balance(Amount::MAX - 10);
        let before = treasury.clone();

        assert!(!treasury.can_accept(11));
        assert_eq!(treasury.credit(1_000), Err(ErrorCode::TreasuryOverflow));
        assert_eq!(treasury, before);

        treasury.credit(10).unwrap();
        assert_eq!(treasury.balance(), Amount::MAX);
        assert!(treasury.is_balanced());
    }

    #[test]
    fn test_credit_total_overflow_after_debits() {
        // Balance has room, but the lifetime credit total does not
        let mut treasury = TreasuryLedger::with_balance(Amount::MAX);
        treasury.debit(Amount::MAX).unwrap();

        assert_eq!(treasury.credit(1), Err(ErrorCode::TreasuryOverflow));
        assert_eq!(treasury.balance(), 0);
        assert!(treasury.is_balanced());
    }

    #[test]
    fn test_debit_entire_balance() {
        let mut treasury = TreasuryLedger::with_balance(100);
        treasury.debit(100).unwrap();
        assert_eq!(treasury.balance(), 0);
        assert!(treasury.is_balanced());
    }
}
