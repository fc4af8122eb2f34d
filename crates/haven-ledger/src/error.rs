//! Error types for the ledger host

use thiserror::Error;

/// Result type alias for host operations (storage, settings)
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur around the ledger state machine
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger operation rejected
    #[error("Ledger operation failed with code {}: {0}", .0.code())]
    Contract(#[from] haven_core::ErrorCode),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Settings file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// No ledger state on disk
    #[error("Ledger not initialized - run 'haven-ledger init' first")]
    NotInitialized,

    /// Ledger state already on disk
    #[error("Ledger already initialized at {0}")]
    AlreadyInitialized(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(e: toml::de::Error) -> Self {
        LedgerError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for LedgerError {
    fn from(e: toml::ser::Error) -> Self {
        LedgerError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::ErrorCode;

    #[test]
    fn test_contract_error_display_includes_code() {
        let err = LedgerError::from(ErrorCode::ExcessWithdrawalDenied);
        assert!(err.to_string().contains("406"));
    }
}
