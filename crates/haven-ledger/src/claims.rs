//! Claim processing
//!
//! A claim is accepted when, in this order:
//! 1. the holder's policy covers the current height (else code 2),
//! 2. the waiting period has passed (else code 1),
//! 3. the policy has not already paid out (else code 1),
//! 4. the treasury can cover the payout (else code 3).
//!
//! All checks run before any state is touched, so a rejected claim leaves
//! both the registry and the treasury unchanged.

use tracing::{debug, info};

use haven_core::{Amount, ErrorCode, Height, Identity, Policy, Result};

use crate::registry::PolicyRegistry;
use crate::treasury::TreasuryLedger;

/// Borrowed view over the registry and treasury for one claim
pub struct ClaimProcessor<'a> {
    registry: &'a mut PolicyRegistry,
    treasury: &'a mut TreasuryLedger,
}

impl<'a> ClaimProcessor<'a> {
    pub fn new(registry: &'a mut PolicyRegistry, treasury: &'a mut TreasuryLedger) -> Self {
        Self { registry, treasury }
    }

    /// Check policy validity, waiting period and duplicate state
    ///
    /// Does not look at the treasury.
    pub fn check_eligibility<'r>(
        registry: &'r PolicyRegistry,
        holder: &Identity,
        at_height: Height,
    ) -> Result<&'r Policy> {
        let policy = match registry.get(holder) {
            Some(policy) if policy.is_valid_at(at_height) => policy,
            _ => return Err(ErrorCode::PolicyExpiredOrMissing),
        };

        if !policy.waiting_period_elapsed(at_height) {
            return Err(ErrorCode::ClaimNotEligible);
        }

        if policy.claimed {
            return Err(ErrorCode::ClaimNotEligible);
        }

        Ok(policy)
    }

    /// Full dry run, including treasury coverage
    pub fn preview(
        registry: &PolicyRegistry,
        treasury: &TreasuryLedger,
        holder: &Identity,
        at_height: Height,
        claim_amount: Amount,
    ) -> Result<()> {
        Self::check_eligibility(registry, holder, at_height)?;

        if !treasury.can_cover(claim_amount) {
            return Err(ErrorCode::InsufficientTreasury);
        }

        Ok(())
    }

    /// File a claim and pay out `claim_amount`
    ///
    /// Returns the amount paid.
    pub fn file_claim(
        &mut self,
        holder: &Identity,
        at_height: Height,
        claim_amount: Amount,
    ) -> Result<Amount> {
        let verdict = Self::preview(
            &*self.registry,
            &*self.treasury,
            holder,
            at_height,
            claim_amount,
        );
        if let Err(e) = verdict {
            debug!(
                "Claim by {} at height {} rejected with code {}",
                holder,
                at_height,
                e.code()
            );
            return Err(e);
        }

        // Debit first: it is the only step that can fail
        self.treasury.debit(claim_amount)?;
        self.registry.mark_claimed(holder);

        info!(
            "Paid claim of {} to {} at height {}",
            claim_amount, holder, at_height
        );

        Ok(claim_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::{CLAIM_WAITING_PERIOD, POLICY_DURATION};

    fn setup(start: Height, treasury_balance: Amount) -> (PolicyRegistry, TreasuryLedger, Identity) {
        let mut registry = PolicyRegistry::new();
        let holder = Identity::new("0x789");
        registry.issue_policy(holder.clone(), start, 1_000);
        (registry, TreasuryLedger::with_balance(treasury_balance), holder)
    }

    #[test]
    fn test_claim_after_waiting_period() {
        let (mut registry, mut treasury, holder) = setup(100_000, 10_000);

        let paid = ClaimProcessor::new(&mut registry, &mut treasury)
            .file_claim(&holder, 100_000 + CLAIM_WAITING_PERIOD, 5_000)
            .unwrap();

        assert_eq!(paid, 5_000);
        assert_eq!(treasury.balance(), 5_000);
        assert!(registry.has_claimed(&holder));
    }

    #[test]
    fn test_claim_too_early() {
        let (mut registry, mut treasury, holder) = setup(100_000, 10_000);

        let result = ClaimProcessor::new(&mut registry, &mut treasury).file_claim(
            &holder,
            100_000 + CLAIM_WAITING_PERIOD - 1,
            5_000,
        );

        assert_eq!(result, Err(ErrorCode::ClaimNotEligible));
        assert_eq!(treasury.balance(), 10_000);
        assert!(!registry.has_claimed(&holder));
    }

    #[test]
    fn test_claim_without_policy() {
        let mut registry = PolicyRegistry::new();
        let mut treasury = TreasuryLedger::with_balance(10_000);

        let result = ClaimProcessor::new(&mut registry, &mut treasury).file_claim(
            &Identity::new("0x456"),
            1_000,
            5_000,
        );

        assert_eq!(result, Err(ErrorCode::PolicyExpiredOrMissing));
    }

    #[test]
    fn test_expired_and_claimed_reports_expired() {
        let (mut registry, mut treasury, holder) = setup(0, 10_000);
        ClaimProcessor::new(&mut registry, &mut treasury)
            .file_claim(&holder, CLAIM_WAITING_PERIOD, 5_000)
            .unwrap();

        let result = ClaimProcessor::new(&mut registry, &mut treasury).file_claim(
            &holder,
            POLICY_DURATION,
            5_000,
        );

        assert_eq!(result, Err(ErrorCode::PolicyExpiredOrMissing));
    }

    #[test]
    fn test_insufficient_treasury_has_no_effect() {
        let (mut registry, mut treasury, holder) = setup(0, 4_999);

        let result = ClaimProcessor::new(&mut registry, &mut treasury).file_claim(
            &holder,
            CLAIM_WAITING_PERIOD,
            5_000,
        );

        assert_eq!(result, Err(ErrorCode::InsufficientTreasury));
        assert_eq!(treasury.balance(), 4_999);
        assert!(!registry.has_claimed(&holder));
    }

    #[test]
    fn test_claim_drains_exact_balance() {
        let (mut registry, mut treasury, holder) = setup(0, 5_000);

        ClaimProcessor::new(&mut registry, &mut treasury)
            .file_claim(&holder, CLAIM_WAITING_PERIOD, 5_000)
            .unwrap();

        assert_eq!(treasury.balance(), 0);
        assert_eq!(treasury.total_debited(), 5_000);
        assert!(registry.has_claimed(&holder));

        // Shortfall after the payout leaves the claimed record as it was
        let (mut other, _, second) = setup(10, 0);
        let result = ClaimProcessor::new(&mut other, &mut treasury).file_claim(
            &second,
            10 + CLAIM_WAITING_PERIOD,
            1,
        );
        assert_eq!(result, Err(ErrorCode::InsufficientTreasury));
        assert!(!other.has_claimed(&second));
        assert!(treasury.is_balanced());
    }
}
