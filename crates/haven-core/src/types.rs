//! Core type aliases and newtypes

use serde::{Deserialize, Serialize};

/// Logical clock value supplied by the execution environment
pub type Height = u64;

/// Token amount held by the treasury or paid as premium/claim
pub type Amount = u64;

/// Opaque caller or holder address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create a new identity from any address string
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the underlying address
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display format (first 8 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl core::str::FromStr for Identity {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Caller identity and current height for a single operation
///
/// Both values come from the environment that sequences operations;
/// the ledger never produces them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Who is invoking the operation
    pub caller: Identity,

    /// Height at which the operation executes
    pub height: Height,
}

impl CallContext {
    pub fn new(caller: impl Into<Identity>, height: Height) -> Self {
        Self {
            caller: caller.into(),
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_short() {
        let id = Identity::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        assert_eq!(id.short(), "SP2J6ZY4");

        let tiny = Identity::new("0x1");
        assert_eq!(tiny.short(), "0x1");
    }

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let id = Identity::new("0x123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0x123\"");
    }
}
