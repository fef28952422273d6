//! Environment-based configuration.

use savvy::fmp::{FmpClient, FmpError};
use savvy::{DEFAULT_BATCH_SIZE, SavvyError};

/// Settings read from the environment and `.env`.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    /// PostgreSQL connection string.
    pub(crate) database_url: Option<String>,
    /// Financial Modeling Prep API key.
    pub(crate) fmp_api_key: Option<String>,
    /// Symbols per metrics batch.
    pub(crate) batch_size: usize,
    /// Maximum pooled database connections.
    pub(crate) max_connections: u32,
}

impl AppConfig {
    /// Load settings. Required values are checked when a command needs them.
    pub(crate) fn from_env() -> Result<Self, SavvyError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            fmp_api_key: non_empty_var("FMP_API_KEY"),
            batch_size: parse_var("METRICS_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
        })
    }

    /// The database URL, or a configuration error naming the variable.
    pub(crate) fn database_url(&self) -> Result<&str, SavvyError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| SavvyError::Config("DATABASE_URL is not set".to_string()))
    }

    /// A provider client built from the configured key.
    pub(crate) fn fmp_client(&self) -> Result<FmpClient, FmpError> {
        self.fmp_api_key
            .as_deref()
            .map(FmpClient::new)
            .ok_or(FmpError::MissingApiKey)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, SavvyError> {
    match non_empty_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SavvyError::Config(format!("{name} is not valid: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: None,
            fmp_api_key: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_connections: 5,
        }
    }

    #[test]
    fn test_missing_database_url_is_config_error() {
        let err = config().database_url().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL is not set");
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(config().fmp_client(), Err(FmpError::MissingApiKey)));

        let configured = AppConfig {
            fmp_api_key: Some("key".to_string()),
            ..config()
        };
        assert!(configured.fmp_client().is_ok());
    }

    #[test]
    fn test_parse_var_default() {
        let value: usize = parse_var("SAVVY_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
