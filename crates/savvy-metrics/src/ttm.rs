//! Trailing-twelve-month aggregation.
//!
//! A TTM figure is the sum of one field over the four most recent quarterly
//! rows. The aggregation is all-or-nothing: fewer than four rows, or a
//! missing value in any of the first four, makes the whole figure
//! unavailable. Partial sums are never produced.

/// Number of quarters in a trailing-twelve-month window.
pub const TTM_QUARTERS: usize = 4;

/// Sum the first four values, or `None` unless all four are present.
///
/// Values are expected most-recent first. Anything past the fourth value is
/// ignored.
///
/// # Example
///
/// ```
/// use savvy_metrics::ttm::sum_ttm;
///
/// assert_eq!(sum_ttm([Some(10.0), Some(20.0), Some(30.0), Some(40.0)]), Some(100.0));
/// assert_eq!(sum_ttm([Some(10.0), Some(20.0), Some(30.0), None]), None);
/// assert_eq!(sum_ttm([Some(10.0), Some(20.0), Some(30.0)]), None);
/// ```
#[must_use]
pub fn sum_ttm<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let window: Vec<Option<f64>> = values.into_iter().take(TTM_QUARTERS).collect();
    if window.len() < TTM_QUARTERS {
        return None;
    }
    window.into_iter().sum()
}

/// TTM sum of a field selected from each statement row.
///
/// ```
/// use savvy_metrics::ttm::ttm_of;
/// use savvy_traits::IncomeStatement;
///
/// let rows = vec![
///     IncomeStatement { revenue: Some(100.0), ..Default::default() };
///     4
/// ];
/// assert_eq!(ttm_of(&rows, |s| s.revenue), Some(400.0));
/// ```
#[must_use]
pub fn ttm_of<T, F>(rows: &[T], field: F) -> Option<f64>
where
    F: Fn(&T) -> Option<f64>,
{
    sum_ttm(rows.iter().map(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use savvy_traits::CashFlowStatement;

    #[test]
    fn test_full_window() {
        let sum = sum_ttm([Some(10.0), Some(20.0), Some(30.0), Some(40.0)]).unwrap();
        assert_relative_eq!(sum, 100.0);
    }

    #[test]
    fn test_one_missing_is_unavailable() {
        assert_eq!(sum_ttm([Some(10.0), Some(20.0), Some(30.0), None]), None);
        assert_eq!(sum_ttm([None, Some(20.0), Some(30.0), Some(40.0)]), None);
    }

    #[test]
    fn test_short_window_is_unavailable() {
        assert_eq!(sum_ttm([]), None);
        assert_eq!(sum_ttm([Some(1.0)]), None);
        assert_eq!(sum_ttm([Some(1.0), Some(2.0), Some(3.0)]), None);
    }

    #[test]
    fn test_extra_rows_ignored() {
        let sum = sum_ttm([Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(100.0)]).unwrap();
        assert_relative_eq!(sum, 4.0);

        // A gap past the window does not matter.
        let sum = sum_ttm([Some(1.0), Some(1.0), Some(1.0), Some(1.0), None]).unwrap();
        assert_relative_eq!(sum, 4.0);
    }

    #[test]
    fn test_ttm_of_selector() {
        let rows: Vec<CashFlowStatement> = [5.0, 6.0, 7.0, 8.0]
            .into_iter()
            .map(|fcf| CashFlowStatement {
                free_cash_flow: Some(fcf),
                ..Default::default()
            })
            .collect();

        assert_relative_eq!(ttm_of(&rows, |r| r.free_cash_flow).unwrap(), 26.0);
        assert_eq!(ttm_of(&rows, |r| r.dividends_paid), None);
        assert_eq!(ttm_of(&rows[..3], |r| r.free_cash_flow), None);
    }
}
