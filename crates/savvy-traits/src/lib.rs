#![doc(issue_tracker_base_url = "https://github.com/fundamental-savvy/savvy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core entities and storage traits for the savvy fundamentals engine.
//!
//! This crate provides the shared vocabulary of the workspace: the persisted
//! market-data entities (quotes, statements, dividends, profiles), the
//! computed [`CompanyMetrics`] record, the error type, and the storage seams
//! the metrics engine reads from and writes to.

/// The version of the savvy-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod filter;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, SavvyError};
pub use filter::{MetricsFilter, MetricsPage, PageRequest};
pub use store::{FundamentalsStore, FundamentalsWriter, MetricsRepository};
pub use types::{
    BalanceSheet, CashFlowStatement, CompanyMetrics, CompanyProfile, Date, Dividend,
    IncomeStatement, Quote, Statement, Symbol, is_quarterly_period,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
