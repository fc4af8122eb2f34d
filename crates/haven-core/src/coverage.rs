//! Coverage report for display

use serde::{Deserialize, Serialize};

use crate::policy::{Policy, PolicyStatus};
use crate::types::Height;

/// Summary of a policy's coverage at a given height
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Status at the queried height
    pub status: PolicyStatus,
    /// Heights until a claim may be filed
    pub heights_until_claimable: Height,
    /// Heights until the policy expires
    pub heights_until_expiry: Height,
    /// Whether expiry is approaching
    pub in_warning_period: bool,
    /// Human-readable status message
    pub message: String,
}

impl CoverageReport {
    /// Build a report for `policy` as seen at `height`
    pub fn from_policy(policy: &Policy, height: Height) -> Self {
        let status = policy.status(height);
        let heights_until_claimable = policy.heights_until_claimable(height);
        let heights_until_expiry = policy.heights_until_expiry(height);
        let in_warning_period = policy.is_warning_period(height);

        let message = match status {
            PolicyStatus::NotYetActive => format!(
                "Policy starts at height {}",
                policy.start_height
            ),
            PolicyStatus::Expired => "Policy has expired - buy a new policy for coverage".to_string(),
            PolicyStatus::Claimed => format!(
                "Claim already paid - coverage ends in {} heights",
                heights_until_expiry
            ),
            PolicyStatus::WaitingPeriod => format!(
                "Waiting period: claims open in {} heights",
                heights_until_claimable
            ),
            PolicyStatus::Claimable if in_warning_period => {
                format!("Warning: {} heights until expiry", heights_until_expiry)
            }
            PolicyStatus::Claimable => format!(
                "OK: claim available, {} heights of coverage remaining",
                heights_until_expiry
            ),
        };

        Self {
            status,
            heights_until_claimable,
            heights_until_expiry,
            in_warning_period,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Identity;
    use crate::POLICY_DURATION;

    #[test]
    fn test_waiting_report() {
        let policy = Policy::new(Identity::new("0x789"), 100_000, 1_000);
        let report = CoverageReport::from_policy(&policy, 100_100);

        assert_eq!(report.status, PolicyStatus::WaitingPeriod);
        assert_eq!(report.heights_until_claimable, 44);
        assert!(report.message.contains("44"));
    }

    #[test]
    fn test_expired_report() {
        let policy = Policy::new(Identity::new("0x789"), 0, 1_000);
        let report = CoverageReport::from_policy(&policy, POLICY_DURATION);

        assert_eq!(report.status, PolicyStatus::Expired);
        assert_eq!(report.heights_until_expiry, 0);
        assert!(!report.in_warning_period);
    }
}
