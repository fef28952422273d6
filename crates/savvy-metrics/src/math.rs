//! Guarded arithmetic shared by every calculator.

/// Divide two optional values.
///
/// Returns `None` when either operand is unavailable or the denominator is
/// exactly zero.
///
/// # Example
///
/// ```
/// use savvy_metrics::safe_divide;
///
/// assert_eq!(safe_divide(Some(10.0), Some(2.0)), Some(5.0));
/// assert_eq!(safe_divide(Some(10.0), Some(0.0)), None);
/// assert_eq!(safe_divide(None, Some(2.0)), None);
/// ```
#[must_use]
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Treat zero as unavailable.
///
/// Several inputs (price, market cap, equity) are only meaningful when
/// non-zero; a zero there gates the calculator exactly like a missing value.
#[must_use]
pub fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
