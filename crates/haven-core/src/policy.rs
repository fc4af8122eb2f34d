//! Policy records and their validity windows
//!
//! A policy is valid over `[start_height, start_height + POLICY_DURATION)`.
//! Claims open once `CLAIM_WAITING_PERIOD` heights have passed since the
//! start. Expiry is always computed from the start height, never stored.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, Height, Identity};
use crate::{CLAIM_WAITING_PERIOD, EXPIRY_WARNING_HEIGHTS, POLICY_DURATION};

/// Status of a policy at a given height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    /// Queried height precedes the start height
    NotYetActive,

    /// Valid, but the claim waiting period has not passed
    WaitingPeriod,

    /// Valid, unclaimed and past the waiting period
    Claimable,

    /// Valid and already paid out
    Claimed,

    /// Past the validity horizon (regardless of claim state)
    Expired,
}

impl PolicyStatus {
    /// Check if the status counts as live coverage
    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            PolicyStatus::WaitingPeriod | PolicyStatus::Claimable | PolicyStatus::Claimed
        )
    }

    /// Check if a fresh claim would be accepted
    pub fn can_claim(&self) -> bool {
        matches!(self, PolicyStatus::Claimable)
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::NotYetActive => "not yet active",
            PolicyStatus::WaitingPeriod => "waiting period",
            PolicyStatus::Claimable => "claimable",
            PolicyStatus::Claimed => "claimed",
            PolicyStatus::Expired => "expired",
        }
    }
}

impl core::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-holder policy record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Holder of the policy
    pub holder: Identity,

    /// Height at which the policy was bought
    pub start_height: Height,

    /// Premium collected for this policy
    pub premium_paid: Amount,

    /// Whether the single claim has been paid out
    pub claimed: bool,
}

impl Policy {
    /// Create a fresh, unclaimed policy
    pub fn new(holder: Identity, start_height: Height, premium_paid: Amount) -> Self {
        Self {
            holder,
            start_height,
            premium_paid,
            claimed: false,
        }
    }

    /// First height at which the policy is no longer valid
    pub fn expires_at(&self) -> Height {
        self.start_height.saturating_add(POLICY_DURATION)
    }

    /// First height at which a claim may be filed
    pub fn claimable_from(&self) -> Height {
        self.start_height.saturating_add(CLAIM_WAITING_PERIOD)
    }

    /// Check if the policy covers the given height
    pub fn is_valid_at(&self, height: Height) -> bool {
        height >= self.start_height && height < self.expires_at()
    }

    /// Check if the policy is past its validity horizon
    pub fn is_expired(&self, height: Height) -> bool {
        height >= self.expires_at()
    }

    /// Check if the claim waiting period has passed
    pub fn waiting_period_elapsed(&self, height: Height) -> bool {
        height.saturating_sub(self.start_height) >= CLAIM_WAITING_PERIOD
    }

    /// Check if in warning period (approaching expiry)
    pub fn is_warning_period(&self, height: Height) -> bool {
        let warning_threshold = self.expires_at().saturating_sub(EXPIRY_WARNING_HEIGHTS);
        height >= warning_threshold && self.is_valid_at(height)
    }

    /// Status at the given height; expiry dominates claim state
    pub fn status(&self, height: Height) -> PolicyStatus {
        if height < self.start_height {
            PolicyStatus::NotYetActive
        } else if self.is_expired(height) {
            PolicyStatus::Expired
        } else if self.claimed {
            PolicyStatus::Claimed
        } else if !self.waiting_period_elapsed(height) {
            PolicyStatus::WaitingPeriod
        } else {
            PolicyStatus::Claimable
        }
    }

    /// Heights until claims open (0 once open)
    pub fn heights_until_claimable(&self, height: Height) -> Height {
        self.claimable_from().saturating_sub(height)
    }

    /// Heights until expiry (0 once expired)
    pub fn heights_until_expiry(&self, height: Height) -> Height {
        self.expires_at().saturating_sub(height)
    }

    /// Record the payout of the single claim
    ///
    /// # Panics
    ///
    /// Panics if the policy was already claimed.
    pub fn mark_claimed(&mut self) {
        assert!(
            !self.claimed,
            "policy for {} already claimed",
            self.holder
        );
        self.claimed = true;
    }
}
