//! Owner-only authorization guard
//!
//! Used by the configuration store and the treasury withdrawal path.

use serde::{Deserialize, Serialize};
use tracing::warn;

use haven_core::{ErrorCode, Identity, Result};

/// Guard holding the single owner identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Identity,
}

impl AccessControl {
    /// Create a guard for the given owner
    pub fn new(owner: Identity) -> Self {
        Self { owner }
    }

    /// The configured owner
    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    /// Check if `caller` is the owner
    pub fn is_owner(&self, caller: &Identity) -> bool {
        caller == &self.owner
    }

    /// Fail with `Unauthorized` unless `caller` is the owner
    pub fn authorize(&self, caller: &Identity, action: &str) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            warn!("Rejected {} by non-owner {}", action, caller);
            Err(ErrorCode::Unauthorized)
        }
    }
}
