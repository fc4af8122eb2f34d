//! Error codes returned by ledger operations
//!
//! Callers branch on the numeric code, so the mapping below is part of the
//! external contract and must never be repurposed.
//!
//! Codes 0, 1, 2, 403 and 406 are the historical set. Codes 3 and 4 are
//! extensions: 3 reports a claim the treasury cannot pay, 4 reports a
//! credit that would overflow the treasury balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Failure of a ledger operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Buyer cannot pay the current insurance fee
    #[error("insufficient funds to pay the insurance fee")]
    InsufficientFunds,

    /// Waiting period not over, or the policy already paid out
    #[error("claim not eligible")]
    ClaimNotEligible,

    /// No policy, or the policy is outside its validity window
    #[error("policy expired or missing")]
    PolicyExpiredOrMissing,

    /// Treasury cannot cover the claim payout
    ///
    /// Extension code 3, outside the historical set.
    #[error("treasury cannot cover the claim payout")]
    InsufficientTreasury,

    /// Credit would overflow the treasury balance
    ///
    /// Extension code 4, outside the historical set.
    #[error("credit would overflow the treasury balance")]
    TreasuryOverflow,

    /// Caller is not the configured owner
    #[error("caller is not authorized")]
    Unauthorized,

    /// Treasury cannot cover the requested withdrawal
    #[error("withdrawal exceeds treasury balance")]
    ExcessWithdrawalDenied,
}

impl ErrorCode {
    /// All codes, in ascending numeric order
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::InsufficientFunds,
        ErrorCode::ClaimNotEligible,
        ErrorCode::PolicyExpiredOrMissing,
        ErrorCode::InsufficientTreasury,
        ErrorCode::TreasuryOverflow,
        ErrorCode::Unauthorized,
        ErrorCode::ExcessWithdrawalDenied,
    ];

    /// Stable numeric code
    pub const fn code(self) -> u32 {
        match self {
            ErrorCode::InsufficientFunds => 0,
            ErrorCode::ClaimNotEligible => 1,
            ErrorCode::PolicyExpiredOrMissing => 2,
            ErrorCode::InsufficientTreasury => 3,
            ErrorCode::TreasuryOverflow => 4,
            ErrorCode::Unauthorized => 403,
            ErrorCode::ExcessWithdrawalDenied => 406,
        }
    }

    /// Look up a code by its numeric value
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

impl From<ErrorCode> for u32 {
    fn from(e: ErrorCode) -> Self {
        e.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::InsufficientFunds.code(), 0);
        assert_eq!(ErrorCode::ClaimNotEligible.code(), 1);
        assert_eq!(ErrorCode::PolicyExpiredOrMissing.code(), 2);
        assert_eq!(ErrorCode::InsufficientTreasury.code(), 3);
        assert_eq!(ErrorCode::TreasuryOverflow.code(), 4);
        assert_eq!(ErrorCode::Unauthorized.code(), 403);
        assert_eq!(ErrorCode::ExcessWithdrawalDenied.code(), 406);
    }

    #[test]
    fn test_from_code() {
        for e in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(e.code()), Some(e));
        }
        assert_eq!(ErrorCode::from_code(404), None);
    }

    #[test]
    fn test_codes_are_distinct() {
        let mut codes: Vec<u32> = ErrorCode::ALL.iter().map(|e| e.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
    }
}
