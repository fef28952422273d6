//! Dividend indicators.
//!
//! [`dividend_yield`] and [`dividend_payout`] look at the trailing year;
//! the [`history`] functions work on calendar-year totals over the complete
//! dividend record.

pub mod history;
mod income;

pub use history::{
    DIVIDEND_GROWTH_YEARS, YearlyDividends, dividend_growth, years_increasing_dividend,
    yearly_totals,
};
pub use income::{TRAILING_DAYS, dividend_payout, dividend_yield};
