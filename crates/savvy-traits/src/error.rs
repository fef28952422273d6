//! Error types for the savvy workspace.
//!
//! Missing inputs are never errors here: calculators report them as `None`.
//! These variants cover the failures that can abort work for a symbol or a
//! whole run (storage, provider, configuration).

use thiserror::Error;

/// The main error type for savvy operations.
#[derive(Debug, Error)]
pub enum SavvyError {
    /// Error raised by the database driver.
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Error from a storage backend that is not a driver error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error due to invalid or malformed data or arguments.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error fetching data from the external provider.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error when a symbol is not known to the store.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for SavvyError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SavvyError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for savvy operations.
pub type Result<T> = std::result::Result<T, SavvyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SavvyError::Config("DATABASE_URL is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL is not set");

        let err = SavvyError::SymbolNotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");
    }

    #[test]
    fn test_error_from_string() {
        let err: SavvyError = "boom".into();
        assert!(matches!(err, SavvyError::Other(_)));

        let err: SavvyError = String::from("boom").into();
        assert_eq!(err.to_string(), "Error: boom");
    }
}
