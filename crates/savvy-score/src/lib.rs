//! Composite quality score for savvy metrics records.
//!
//! Each of the thirteen indicators is mapped through its own piecewise-linear
//! curve (see [`SCORING_CURVES`]) into a partial score, and the composite is
//! the sum of partials divided by thirteen.
//!
//! # Examples
//!
//! ```rust
//! use savvy_metrics::Indicators;
//! use savvy_score::{QualityScorer, Scorer};
//!
//! let indicators = Indicators {
//!     pe_ratio: Some(3.75),
//!     ..Default::default()
//! };
//!
//! let score = QualityScorer::default().score(&indicators);
//! assert!((score - 4.6875 / 13.0).abs() < 1e-12);
//! ```

mod curve;
mod scorer;

// Re-export main types
pub use curve::{Curve, CurveRule, MAX_PARTIAL, SCORING_CURVES, curve_for};
pub use scorer::{PartialScore, QualityScorer, ScoreBreakdown, Scorer};
