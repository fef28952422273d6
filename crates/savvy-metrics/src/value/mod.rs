//! Valuation ratios comparing price or enterprise value to fundamentals.
//!
//! - P/E: price over TTM earnings per share
//! - P/B: market cap over tangible book value
//! - P/S: market cap over TTM revenue
//! - EV/EBITDA and EV/FCF: enterprise value over TTM EBITDA and free cash flow
//!
//! Every calculator is total: it returns `None` whenever an input it needs
//! is unavailable and never fails.

mod enterprise;
mod multiples;

pub use enterprise::{enterprise_value, ev_ebitda_ratio, ev_fcf_ratio};
pub use multiples::{pb_ratio, pe_ratio, ps_ratio};
