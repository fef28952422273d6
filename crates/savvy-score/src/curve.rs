//! Piecewise-linear scoring curves, one per indicator.
//!
//! Each curve maps an indicator value to a partial score in `0..=10`
//! (the dividend growth curve can exceed 10 just below its cap). A value
//! outside the curve's domain scores 0.

use savvy_metrics::{Indicator, Indicators};
use serde::Serialize;

/// Partial score awarded at the top of a curve.
pub const MAX_PARTIAL: f64 = 10.0;

/// Shape of a scoring curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Curve {
    /// Ramp up to a plateau, then decline to zero.
    ///
    /// Domain `lower < x < upper`. Up to and including `ramp_end` the score
    /// is `10 x / ramp_end`; strictly between `ramp_end` and `plateau_end`
    /// it is 10; from `plateau_end` on it falls linearly to 0 at `upper`.
    Band {
        /// Exclusive lower domain bound.
        lower: f64,
        /// End of the rising ramp.
        ramp_end: f64,
        /// Start of the declining segment.
        plateau_end: f64,
        /// Exclusive upper domain bound.
        upper: f64,
    },
    /// Full score below a threshold, then a linear decline.
    ///
    /// Domain `x < limit`. Below `full` (or at it, when `inclusive`) the
    /// score is 10; above it the score is `10 - (x - full) * slope`.
    Descending {
        /// Threshold of the full-score region.
        full: f64,
        /// Whether `x == full` still earns the full score.
        inclusive: bool,
        /// Exclusive upper domain bound.
        limit: f64,
        /// Points lost per unit above `full`.
        slope: f64,
    },
    /// Linear rise from zero, capped at full score.
    ///
    /// Domain `x > 0`. Above `cap` (or at it, when `inclusive`) the score is
    /// 10; otherwise `x * slope`.
    Ascending {
        /// Threshold of the full-score region.
        cap: f64,
        /// Whether `x == cap` already earns the full score.
        inclusive: bool,
        /// Points per unit below `cap`.
        slope: f64,
    },
    /// EV/FCF curve, gated on the EV/EBITDA ratio.
    ///
    /// Domain `x < limit`. Scores 10 when EV/EBITDA is at most `gate`,
    /// otherwise `limit - x`. An unavailable EV/EBITDA fails the gate.
    EvEbitdaGated {
        /// Exclusive upper domain bound, also the base of the fallback.
        limit: f64,
        /// Largest EV/EBITDA that earns the full score.
        gate: f64,
    },
}

impl Curve {
    /// Partial score of `value`, with the full indicator set as context.
    #[must_use]
    pub fn partial(&self, value: f64, indicators: &Indicators) -> f64 {
        match *self {
            Self::Band {
                lower,
                ramp_end,
                plateau_end,
                upper,
            } => {
                if value <= lower || value >= upper {
                    0.0
                } else if value <= ramp_end {
                    value * MAX_PARTIAL / ramp_end
                } else if value < plateau_end {
                    MAX_PARTIAL
                } else {
                    (upper - value) * MAX_PARTIAL / (upper - plateau_end)
                }
            }
            Self::Descending {
                full,
                inclusive,
                limit,
                slope,
            } => {
                if value >= limit {
                    0.0
                } else if value < full || (inclusive && value == full) {
                    MAX_PARTIAL
                } else {
                    MAX_PARTIAL - (value - full) * slope
                }
            }
            Self::Ascending {
                cap,
                inclusive,
                slope,
            } => {
                if value <= 0.0 {
                    0.0
                } else if value > cap || (inclusive && value == cap) {
                    MAX_PARTIAL
                } else {
                    value * slope
                }
            }
            Self::EvEbitdaGated { limit, gate } => {
                if value >= limit {
                    0.0
                } else if indicators.ev_ebitda_ratio.is_some_and(|r| r <= gate) {
                    MAX_PARTIAL
                } else {
                    limit - value
                }
            }
        }
    }
}

/// A curve bound to the indicator it scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveRule {
    /// Scored indicator.
    pub indicator: Indicator,
    /// Curve applied to its value.
    pub curve: Curve,
}

impl CurveRule {
    /// Partial score of the rule's indicator; 0 when unavailable.
    #[must_use]
    pub fn score(&self, indicators: &Indicators) -> f64 {
        indicators
            .get(self.indicator)
            .map_or(0.0, |value| self.curve.partial(value, indicators))
    }
}

const fn descending(
    indicator: Indicator,
    full: f64,
    inclusive: bool,
    limit: f64,
    slope: f64,
) -> CurveRule {
    CurveRule {
        indicator,
        curve: Curve::Descending {
            full,
            inclusive,
            limit,
            slope,
        },
    }
}

const fn ascending(indicator: Indicator, cap: f64, inclusive: bool, slope: f64) -> CurveRule {
    CurveRule {
        indicator,
        curve: Curve::Ascending {
            cap,
            inclusive,
            slope,
        },
    }
}

/// The scoring table, one rule per indicator in record order.
pub const SCORING_CURVES: [CurveRule; 13] = [
    CurveRule {
        indicator: Indicator::PeRatio,
        curve: Curve::Band {
            lower: 0.0,
            ramp_end: 8.0,
            plateau_end: 15.0,
            upper: 30.0,
        },
    },
    descending(Indicator::PbRatio, 5.0, false, 10.0, 2.0),
    descending(Indicator::PsRatio, 3.0, false, 6.0, 10.0 / 3.0),
    descending(Indicator::EvEbitdaRatio, 12.0, false, 18.0, 10.0 / 6.0),
    CurveRule {
        indicator: Indicator::EvFcfRatio,
        curve: Curve::EvEbitdaGated {
            limit: 30.0,
            gate: 20.0,
        },
    },
    ascending(Indicator::Copm, 0.20, false, 10.0 / 0.20),
    ascending(Indicator::Roic, 0.15, true, 10.0 / 0.15),
    ascending(Indicator::Rota, 0.15, true, 10.0 / 0.15),
    descending(Indicator::DebtEbitdaRatio, 3.0, true, 6.0, 10.0 / 3.0),
    ascending(Indicator::DividendYield, 0.03, false, 10.0 / 0.03),
    descending(Indicator::DividendPayout, 0.8, false, 0.9, 100.0),
    // Rises to 100 just below the cap before dropping to 10 above it.
    ascending(Indicator::DividendGrowth10y, 0.07, false, 100.0 / 0.07),
    ascending(Indicator::YearsIncreasingDividend, 10.0, false, 1.0),
];

/// Look up the rule for an indicator.
#[must_use]
pub fn curve_for(indicator: Indicator) -> Option<&'static CurveRule> {
    SCORING_CURVES.iter().find(|rule| rule.indicator == indicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn partial(indicator: Indicator, value: f64) -> f64 {
        let rule = curve_for(indicator).unwrap();
        rule.curve.partial(value, &Indicators::default())
    }

    #[test]
    fn test_every_indicator_has_a_curve() {
        for indicator in Indicator::ALL {
            assert!(curve_for(indicator).is_some(), "{indicator}");
        }
        assert_eq!(SCORING_CURVES.len(), Indicator::ALL.len());
    }

    #[test]
    fn test_pe_curve() {
        assert_relative_eq!(partial(Indicator::PeRatio, 3.75), 4.6875);
        assert_relative_eq!(partial(Indicator::PeRatio, 8.0), 10.0);
        assert_relative_eq!(partial(Indicator::PeRatio, 12.0), 10.0);
        assert_relative_eq!(partial(Indicator::PeRatio, 15.0), 10.0);
        assert_relative_eq!(partial(Indicator::PeRatio, 22.5), 5.0);
        assert_relative_eq!(partial(Indicator::PeRatio, 30.0), 0.0);
        assert_relative_eq!(partial(Indicator::PeRatio, 0.0), 0.0);
        assert_relative_eq!(partial(Indicator::PeRatio, -4.0), 0.0);
    }

    #[test]
    fn test_pb_curve() {
        assert_relative_eq!(partial(Indicator::PbRatio, -1.0), 10.0);
        assert_relative_eq!(partial(Indicator::PbRatio, 4.9), 10.0);
        assert_relative_eq!(partial(Indicator::PbRatio, 7.5), 5.0);
        assert_relative_eq!(partial(Indicator::PbRatio, 10.0), 0.0);
    }

    #[test]
    fn test_ps_curve() {
        assert_relative_eq!(partial(Indicator::PsRatio, 2.0), 10.0);
        assert_relative_eq!(partial(Indicator::PsRatio, 4.5), 5.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::PsRatio, 6.0), 0.0);
    }

    #[test]
    fn test_ev_ebitda_curve() {
        assert_relative_eq!(partial(Indicator::EvEbitdaRatio, 11.0), 10.0);
        assert_relative_eq!(partial(Indicator::EvEbitdaRatio, 15.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::EvEbitdaRatio, 18.0), 0.0);
    }

    #[test]
    fn test_ev_fcf_curve_gated_on_ev_ebitda() {
        let rule = curve_for(Indicator::EvFcfRatio).unwrap();
        let cheap = Indicators {
            ev_ebitda_ratio: Some(20.0),
            ..Default::default()
        };
        let rich = Indicators {
            ev_ebitda_ratio: Some(25.0),
            ..Default::default()
        };

        assert_relative_eq!(rule.curve.partial(25.0, &cheap), 10.0);
        assert_relative_eq!(rule.curve.partial(25.0, &rich), 5.0);
        assert_relative_eq!(rule.curve.partial(25.0, &Indicators::default()), 5.0);
        assert_relative_eq!(rule.curve.partial(30.0, &cheap), 0.0);
    }

    #[test]
    fn test_returns_curves() {
        assert_relative_eq!(partial(Indicator::Copm, 0.10), 5.0);
        assert_relative_eq!(partial(Indicator::Copm, 0.25), 10.0);
        assert_relative_eq!(partial(Indicator::Copm, -0.1), 0.0);

        assert_relative_eq!(partial(Indicator::Roic, 0.15), 10.0);
        assert_relative_eq!(partial(Indicator::Roic, 0.075), 5.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::Rota, 0.03), 2.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::Rota, 0.0), 0.0);
    }

    #[test]
    fn test_debt_ebitda_curve() {
        assert_relative_eq!(partial(Indicator::DebtEbitdaRatio, 3.0), 10.0);
        assert_relative_eq!(partial(Indicator::DebtEbitdaRatio, 4.5), 5.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::DebtEbitdaRatio, 6.0), 0.0);
        assert_relative_eq!(partial(Indicator::DebtEbitdaRatio, -2.0), 10.0);
    }

    #[test]
    fn test_dividend_curves() {
        assert_relative_eq!(partial(Indicator::DividendYield, 0.015), 5.0, epsilon = 1e-12);
        assert_relative_eq!(partial(Indicator::DividendYield, 0.05), 10.0);

        assert_relative_eq!(partial(Indicator::DividendPayout, 0.5), 10.0);
        assert_relative_eq!(partial(Indicator::DividendPayout, 0.85), 5.0, epsilon = 1e-9);
        assert_relative_eq!(partial(Indicator::DividendPayout, 0.95), 0.0);

        assert_relative_eq!(partial(Indicator::DividendGrowth10y, 0.08), 10.0);
        assert_relative_eq!(partial(Indicator::DividendGrowth10y, 0.035), 50.0, epsilon = 1e-9);
        assert_relative_eq!(partial(Indicator::DividendGrowth10y, 0.07), 100.0, epsilon = 1e-9);
        assert_relative_eq!(partial(Indicator::DividendGrowth10y, -0.02), 0.0);

        assert_relative_eq!(partial(Indicator::YearsIncreasingDividend, 4.0), 4.0);
        assert_relative_eq!(partial(Indicator::YearsIncreasingDividend, 10.0), 10.0);
        assert_relative_eq!(partial(Indicator::YearsIncreasingDividend, 25.0), 10.0);
        assert_relative_eq!(partial(Indicator::YearsIncreasingDividend, 0.0), 0.0);
    }

    #[test]
    fn test_unavailable_scores_zero() {
        for rule in &SCORING_CURVES {
            assert_relative_eq!(rule.score(&Indicators::default()), 0.0);
        }
    }
}
