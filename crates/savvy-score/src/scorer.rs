//! Core trait definition for composite scorers, and the quality scorer.

use savvy_metrics::{Indicator, Indicators};
use serde::Serialize;

use crate::curve::{CurveRule, SCORING_CURVES};

/// Reduces an indicator set to a single composite score.
///
/// All implementations must be thread-safe (Send + Sync) so one scorer can
/// be shared across a batch.
///
/// # Examples
///
/// ```rust
/// use savvy_metrics::Indicators;
/// use savvy_score::Scorer;
///
/// struct Available;
///
/// impl Scorer for Available {
///     fn score(&self, indicators: &Indicators) -> f64 {
///         indicators.available_count() as f64
///     }
///
///     fn name(&self) -> &str {
///         "available"
///     }
/// }
///
/// assert_eq!(Available.score(&Indicators::default()), 0.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Composite score of an indicator set.
    fn score(&self, indicators: &Indicators) -> f64;

    /// Name of this scoring strategy.
    fn name(&self) -> &str;
}

/// The partial score of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartialScore {
    /// Scored indicator.
    pub indicator: Indicator,
    /// Indicator value, if available.
    pub value: Option<f64>,
    /// Points awarded by the indicator's curve.
    pub points: f64,
}

/// Per-indicator partial scores and the resulting composite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// One entry per indicator, in record order.
    pub partials: Vec<PartialScore>,
    /// Composite score.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Partial score of one indicator.
    #[must_use]
    pub fn points(&self, indicator: Indicator) -> Option<f64> {
        self.partials
            .iter()
            .find(|p| p.indicator == indicator)
            .map(|p| p.points)
    }
}

/// Equal-weight average of the per-indicator curve scores.
///
/// Every indicator counts toward the divisor: an unavailable or
/// out-of-domain indicator contributes 0 rather than being skipped.
#[derive(Debug, Clone, Copy)]
pub struct QualityScorer {
    curves: &'static [CurveRule],
}

impl QualityScorer {
    /// Scorer over the standard curve table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            curves: &SCORING_CURVES,
        }
    }

    /// The curve table in use.
    #[must_use]
    pub const fn curves(&self) -> &'static [CurveRule] {
        self.curves
    }

    /// Score an indicator set, keeping the partial scores.
    #[must_use]
    pub fn breakdown(&self, indicators: &Indicators) -> ScoreBreakdown {
        let partials: Vec<PartialScore> = self
            .curves
            .iter()
            .map(|rule| PartialScore {
                indicator: rule.indicator,
                value: indicators.get(rule.indicator),
                points: rule.score(indicators),
            })
            .collect();

        let sum: f64 = partials.iter().map(|p| p.points).sum();
        let total = sum / Indicator::ALL.len() as f64;

        ScoreBreakdown { partials, total }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for QualityScorer {
    fn score(&self, indicators: &Indicators) -> f64 {
        self.breakdown(indicators).total
    }

    fn name(&self) -> &str {
        "quality"
    }
}
