//! Profitability and balance-sheet quality ratios.
//!
//! - COPM: TTM EBITDA over TTM revenue
//! - ROIC: after-tax operating income over invested capital
//! - ROTA: TTM net income over tangible assets
//! - Debt/EBITDA: latest total debt over TTM EBITDA

mod leverage;
mod margins;
mod returns;

pub use leverage::debt_ebitda_ratio;
pub use margins::copm;
pub use returns::{DEFAULT_TAX_RATE, effective_tax_rate, roic, rota};
