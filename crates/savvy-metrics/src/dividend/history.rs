//! Calendar-year dividend analysis.
//!
//! Both indicators here are anchored on the current calendar year, which is
//! usually still in progress and therefore skipped.

use std::collections::BTreeMap;

use chrono::Datelike;
use savvy_traits::Dividend;

/// Look-back span of the dividend growth rate, in years.
pub const DIVIDEND_GROWTH_YEARS: i32 = 10;

/// Per-share dividend totals keyed by calendar year.
pub type YearlyDividends = BTreeMap<i32, f64>;

/// Sum dividend amounts by calendar year of the ex-dividend date.
#[must_use]
pub fn yearly_totals(dividends: &[Dividend]) -> YearlyDividends {
    let mut totals = YearlyDividends::new();
    for d in dividends {
        *totals.entry(d.date.year()).or_insert(0.0) += d.amount();
    }
    totals
}

/// Compound annual dividend growth over up to `years` years.
///
/// The end year is the most recent year with dividends, or the one before it
/// when the most recent is not earlier than `current_year`. The start year is
/// the latest year at or before `end - years`, else the oldest year on
/// record. Returns `Some(0.0)` when the span is under a year or either
/// endpoint total is not positive, and `None` without at least two years of
/// history.
#[must_use]
pub fn dividend_growth(dividends: &[Dividend], years: i32, current_year: i32) -> Option<f64> {
    let totals = yearly_totals(dividends);
    if totals.len() < 2 {
        return None;
    }

    let descending: Vec<i32> = totals.keys().rev().copied().collect();
    let last_year = if descending[0] < current_year {
        descending[0]
    } else {
        descending[1]
    };

    let target = last_year - years;
    let first_year = descending
        .iter()
        .copied()
        .find(|year| *year <= target)
        .or_else(|| descending.last().copied())?;

    let span = last_year - first_year;
    if span < 1 {
        return Some(0.0);
    }

    let current = totals[&last_year];
    let oldest = totals[&first_year];
    if oldest <= 0.0 || current <= 0.0 {
        return Some(0.0);
    }

    Some((current / oldest).powf(1.0 / f64::from(span)) - 1.0)
}

/// Consecutive calendar years of dividend increases.
///
/// Walks completed years backwards from the most recent one, counting each
/// year whose total exceeds the year before it. Stops at the first gap or
/// non-increase. The streak is 0 when the previous calendar year paid
/// nothing or fewer than two years are on record, and `None` without any
/// dividend history.
#[must_use]
pub fn years_increasing_dividend(dividends: &[Dividend], current_year: i32) -> Option<i32> {
    if dividends.is_empty() {
        return None;
    }

    let totals = yearly_totals(dividends);
    if totals.len() < 2 || !totals.contains_key(&(current_year - 1)) {
        return Some(0);
    }

    let descending: Vec<i32> = totals.keys().rev().copied().collect();
    let mut streak = 0;
    for pair in descending.windows(2) {
        let (year, prev) = (pair[0], pair[1]);
        if year == current_year {
            continue;
        }
        if year - prev != 1 || totals[&year] <= totals[&prev] {
            break;
        }
        streak += 1;
    }

    Some(streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, dividend};
    use approx::assert_relative_eq;

    fn annual(years: &[(i32, f64)]) -> Vec<Dividend> {
        years
            .iter()
            .rev()
            .map(|(year, amount)| dividend(date(*year, 6, 15), *amount))
            .collect()
    }

    #[test]
    fn test_yearly_totals() {
        let history = vec![
            dividend(date(2024, 12, 1), 0.25),
            dividend(date(2024, 6, 1), 0.25),
            dividend(date(2023, 6, 1), 0.40),
        ];
        let totals = yearly_totals(&history);
        assert_relative_eq!(totals[&2024], 0.5);
        assert_relative_eq!(totals[&2023], 0.4);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_growth_falls_back_to_oldest_year() {
        let history = annual(&[(2015, 1.0), (2024, 2.0)]);
        let growth = dividend_growth(&history, DIVIDEND_GROWTH_YEARS, 2025).unwrap();
        assert_relative_eq!(growth, 2.0_f64.powf(1.0 / 9.0) - 1.0);
        assert_relative_eq!(growth, 0.0801, epsilon = 1e-4);
    }

    #[test]
    fn test_growth_skips_current_year() {
        // 2025 is partial; anchor on 2024 and look back to 2014.
        let history = annual(&[(2013, 0.5), (2014, 1.0), (2024, 2.0), (2025, 0.1)]);
        let growth = dividend_growth(&history, DIVIDEND_GROWTH_YEARS, 2025).unwrap();
        assert_relative_eq!(growth, 2.0_f64.powf(0.1) - 1.0);
    }

    #[test]
    fn test_growth_degenerate_cases() {
        assert_eq!(dividend_growth(&[], DIVIDEND_GROWTH_YEARS, 2025), None);
        assert_eq!(
            dividend_growth(&annual(&[(2024, 1.0)]), DIVIDEND_GROWTH_YEARS, 2025),
            None
        );

        // Anchor and start collapse onto the same year.
        let same = annual(&[(2024, 1.0), (2025, 1.0)]);
        assert_eq!(dividend_growth(&same, DIVIDEND_GROWTH_YEARS, 2025), Some(0.0));

        let zero_start = annual(&[(2015, 0.0), (2024, 2.0)]);
        assert_eq!(dividend_growth(&zero_start, DIVIDEND_GROWTH_YEARS, 2025), Some(0.0));
    }

    #[test]
    fn test_streak_stops_on_first_decrease() {
        let history = annual(&[(2020, 1.0), (2021, 1.2), (2022, 1.1)]);
        assert_eq!(years_increasing_dividend(&history, 2023), Some(0));
    }

    #[test]
    fn test_streak_counts_consecutive_increases() {
        let history = annual(&[
            (2018, 1.2),
            (2019, 1.0),
            (2020, 1.1),
            (2021, 1.2),
            (2022, 1.3),
            (2023, 0.4),
        ]);
        assert_eq!(years_increasing_dividend(&history, 2023), Some(3));
    }

    #[test]
    fn test_streak_stops_on_gap() {
        let history = annual(&[(2018, 0.5), (2020, 1.0), (2021, 1.1), (2022, 1.2)]);
        assert_eq!(years_increasing_dividend(&history, 2023), Some(2));
    }

    #[test]
    fn test_streak_requires_previous_year() {
        let lapsed = annual(&[(2019, 1.0), (2020, 1.2), (2021, 1.3)]);
        assert_eq!(years_increasing_dividend(&lapsed, 2023), Some(0));

        assert_eq!(years_increasing_dividend(&annual(&[(2022, 1.0)]), 2023), Some(0));
        assert_eq!(years_increasing_dividend(&[], 2023), None);
    }
}
