#![doc(issue_tracker_base_url = "https://github.com/fundamental-savvy/savvy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # savvy
//!
//! Fundamental metrics engine for listed companies.
//!
//! savvy reads persisted quotes, quarterly statements and dividend history,
//! computes thirteen valuation, profitability, leverage and dividend
//! indicators over trailing-twelve-month windows, and reduces them to a
//! 0..=10 quality score. This umbrella crate re-exports the sub-crates and
//! hosts the jobs that tie them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use savvy::store::PgStore;
//! use savvy::{DEFAULT_BATCH_SIZE, sync_company_metrics};
//! use savvy::Date;
//!
//! # async fn run() -> savvy::Result<()> {
//! let store = PgStore::connect("postgres://localhost/savvy", 5).await?;
//! let as_of = Date::from_ymd_opt(2025, 6, 30).unwrap();
//!
//! let stats = sync_company_metrics(&store, &store, None, DEFAULT_BATCH_SIZE, as_of).await?;
//! println!("saved {} of {}", stats.saved, stats.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Entities, errors, filters and storage traits
//! - [`metrics`] - TTM aggregation, ratio calculators and dividend history
//! - [`score`] - Scoring curves and the composite quality score
//! - [`store`] - PostgreSQL and in-memory storage backends
//! - [`fmp`] - Financial Modeling Prep client
//!
//! ## Pipeline
//!
//! 1. **Snapshot**: every series for a symbol is read once
//! 2. **Indicators**: ratios are computed; missing inputs yield `None`
//! 3. **Score**: each indicator maps to 0..=10 and the thirteen are averaged
//! 4. **Persist**: records are upserted by symbol, batch by batch

/// Version information for the savvy crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod engine;
mod fundamentals;
mod stats;
mod sync;

pub use engine::{MetricsReport, assemble_metrics, compute_company_metrics, evaluate_company};
pub use fundamentals::{store_fundamentals, sync_fundamentals};
pub use stats::SyncStats;
pub use sync::{DEFAULT_BATCH_SIZE, sync_company_metrics};

// Re-export error and common types
pub use savvy_traits::{CompanyMetrics, Date, Result, SavvyError, Symbol};

/// Core entities, errors, filters and storage traits.
pub mod traits {
    pub use savvy_traits::*;
}

/// Indicator calculators.
///
/// Valuation multiples (P/E, P/B, P/S), enterprise value multiples
/// (EV/EBITDA, EV/FCF), profitability (COPM, ROIC, ROTA), leverage
/// (Debt/EBITDA) and dividend metrics (yield, payout, ten-year growth,
/// consecutive years of increases).
pub mod metrics {
    pub use savvy_metrics::*;
}

/// Composite scoring.
pub mod score {
    pub use savvy_score::*;
}

/// Storage backends.
pub mod store {
    pub use savvy_store::*;
}

/// Financial Modeling Prep API client.
///
/// Set `FMP_API_KEY` in the environment or a `.env` file.
pub mod fmp {
    pub use savvy_fmp::*;
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use savvy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::metrics::{FundamentalSnapshot, Indicator, Indicators};
    pub use crate::score::{QualityScorer, Scorer};
    pub use crate::traits::{FundamentalsStore, FundamentalsWriter, MetricsRepository};
    pub use crate::{CompanyMetrics, Result, SavvyError, compute_company_metrics};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_store(_store: &dyn traits::FundamentalsStore) {}
        fn _accept_repo(_repo: &dyn traits::MetricsRepository) {}
        fn _accept_scorer(_scorer: &dyn score::Scorer) {}

        let _result: Result<()> = Ok(());
        let _error = SavvyError::InvalidData("test".to_string());
    }
}
