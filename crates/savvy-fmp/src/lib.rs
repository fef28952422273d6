//! Financial Modeling Prep (FMP) API client for savvy.
//!
//! This crate fetches the raw inputs of the metrics engine from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API:
//! company profiles, quotes, quarterly statements and dividend history.
//! Responses are converted into `savvy_traits` entities with explicit
//! per-type conversions.
//!
//! # Usage
//!
//! ```rust,no_run
//! use savvy_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Profile, quote, four quarters of statements and all dividends
//!     let data = client.fundamental_data("AAPL", 4).await?;
//!     println!("{} income statements", data.income_statements.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
