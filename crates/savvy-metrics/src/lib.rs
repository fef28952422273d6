//! Fundamental indicator calculators for the savvy engine.
//!
//! This crate turns a symbol's persisted market data into the thirteen
//! indicators stored on a metrics record:
//! - Value: P/E, P/B, P/S, EV/EBITDA, EV/FCF
//! - Quality: COPM, ROIC, ROTA, Debt/EBITDA
//! - Dividend: yield, payout, ten-year growth, years of increases
//!
//! Trailing-twelve-month figures require four complete quarters. Every
//! calculator is total: a missing input yields `None`, never an error.
//!
//! # Example
//!
//! ```
//! use savvy_metrics::{FundamentalSnapshot, Indicators};
//! use savvy_traits::{Date, IncomeStatement, Quote};
//!
//! let snapshot = FundamentalSnapshot {
//!     quote: Some(Quote { price: Some(15.0), ..Default::default() }),
//!     income_statements: vec![
//!         IncomeStatement { eps: Some(1.0), ..Default::default() };
//!         4
//!     ],
//!     ..FundamentalSnapshot::new("AAPL")
//! };
//!
//! let as_of = Date::from_ymd_opt(2025, 1, 15).unwrap();
//! let indicators = Indicators::compute(&snapshot, as_of);
//! assert_eq!(indicators.pe_ratio, Some(3.75));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod dividend;
pub mod indicators;
pub mod math;
pub mod quality;
pub mod registry;
pub mod snapshot;
pub mod ttm;
pub mod value;

#[cfg(test)]
mod fixtures;

// Re-export key types
pub use indicators::Indicators;
pub use math::safe_divide;
pub use registry::{Indicator, IndicatorCategory, IndicatorInfo};
pub use snapshot::FundamentalSnapshot;
