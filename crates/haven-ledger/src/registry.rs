//! Policy registry
//!
//! Tracks the single policy record held by each identity. Records are
//! never deleted; expiry is derived from the start height.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use haven_core::{Amount, Height, Identity, Policy, PolicyStatus};

/// Counts of policies per status at one height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub not_yet_active: usize,
    pub waiting: usize,
    pub claimable: usize,
    pub claimed: usize,
    pub expired: usize,
}

/// Registry of all policies, keyed by holder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyRegistry {
    /// Latest policy per holder
    policies: BTreeMap<Identity, Policy>,
}

impl PolicyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            policies: BTreeMap::new(),
        }
    }

    /// Issue a fresh policy, replacing any previous record for `holder`
    pub fn issue_policy(&mut self, holder: Identity, at_height: Height, premium: Amount) -> &Policy {
        let policy = Policy::new(holder.clone(), at_height, premium);

        if let Some(previous) = self.policies.insert(holder.clone(), policy) {
            info!(
                "Renewed policy for {} (previous start {}, claimed: {})",
                holder, previous.start_height, previous.claimed
            );
        } else {
            info!("Issued policy for {} at height {}", holder, at_height);
        }

        &self.policies[&holder]
    }

    /// Get the policy for `holder`, if any
    pub fn get(&self, holder: &Identity) -> Option<&Policy> {
        self.policies.get(holder)
    }

    /// Check if `holder` has a policy covering `at_height`
    pub fn is_valid(&self, holder: &Identity, at_height: Height) -> bool {
        self.get(holder)
            .map(|p| p.is_valid_at(at_height))
            .unwrap_or(false)
    }

    /// Check if `holder`'s policy has already paid out
    pub fn has_claimed(&self, holder: &Identity) -> bool {
        self.get(holder).map(|p| p.claimed).unwrap_or(false)
    }

    /// Mark `holder`'s policy as paid out
    ///
    /// # Panics
    ///
    /// Panics if `holder` has no policy or it was already claimed. Callers
    /// check eligibility first.
    pub fn mark_claimed(&mut self, holder: &Identity) {
        let policy = self
            .policies
            .get_mut(holder)
            .unwrap_or_else(|| panic!("mark_claimed on missing policy for {}", holder));
        policy.mark_claimed();
    }

    /// Status of `holder`'s policy at `at_height`
    pub fn status(&self, holder: &Identity, at_height: Height) -> Option<PolicyStatus> {
        self.get(holder).map(|p| p.status(at_height))
    }

    /// List policies covering `at_height`
    pub fn list_active(&self, at_height: Height) -> Vec<&Policy> {
        self.policies
            .values()
            .filter(|p| p.is_valid_at(at_height))
            .collect()
    }

    /// List all policies
    pub fn list_all(&self) -> Vec<&Policy> {
        self.policies.values().collect()
    }

    /// Number of holders with a record
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Get count of policies by status at `at_height`
    pub fn count_by_status(&self, at_height: Height) -> StatusCounts {
        let mut counts = StatusCounts::default();

        for policy in self.policies.values() {
            match policy.status(at_height) {
                PolicyStatus::NotYetActive => counts.not_yet_active += 1,
                PolicyStatus::WaitingPeriod => counts.waiting += 1,
                PolicyStatus::Claimable => counts.claimable += 1,
                PolicyStatus::Claimed => counts.claimed += 1,
                PolicyStatus::Expired => counts.expired += 1,
            }
        }

        counts
    }
}
