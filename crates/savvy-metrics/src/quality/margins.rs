//! Cash operating profit margin.

use savvy_traits::IncomeStatement;

use crate::math::safe_divide;
use crate::ttm::ttm_of;

/// TTM EBITDA / TTM revenue (EBITDA margin).
///
/// Both sums must cover four complete quarters.
#[must_use]
pub fn copm(income: &[IncomeStatement]) -> Option<f64> {
    safe_divide(ttm_of(income, |s| s.ebitda), ttm_of(income, |s| s.revenue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::income;
    use approx::assert_relative_eq;

    #[test]
    fn test_copm() {
        let rows = income(4, |s| {
            s.ebitda = Some(25.0);
            s.revenue = Some(100.0);
        });
        assert_relative_eq!(copm(&rows).unwrap(), 0.25);
    }

    #[test]
    fn test_copm_three_of_four_quarters() {
        let mut rows = income(4, |s| {
            s.ebitda = Some(25.0);
            s.revenue = Some(100.0);
        });
        rows[0].ebitda = None;
        assert_eq!(copm(&rows), None);
        assert_eq!(copm(&rows[1..]), None);
    }

    #[test]
    fn test_copm_zero_revenue() {
        let rows = income(4, |s| {
            s.ebitda = Some(25.0);
            s.revenue = Some(0.0);
        });
        assert_eq!(copm(&rows), None);
    }
}
