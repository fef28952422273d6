//! Per-symbol metrics computation.
//!
//! One symbol flows through three steps: its fundamentals are read once into
//! a [`FundamentalSnapshot`], the thirteen [`Indicators`] are computed from
//! that snapshot, and the [`QualityScorer`] reduces them to a score. Nothing
//! is re-read mid-computation.

use savvy_metrics::{FundamentalSnapshot, Indicators};
use savvy_score::{QualityScorer, ScoreBreakdown};
use savvy_traits::{CompanyMetrics, Date, FundamentalsStore, Result};
use serde::Serialize;
use tracing::debug;

/// A computed record together with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// The record as it is persisted.
    pub metrics: CompanyMetrics,
    /// Per-indicator partial scores behind `metrics.score`.
    pub breakdown: ScoreBreakdown,
}

/// Build the persisted record from a snapshot and its computed values.
#[must_use]
pub fn assemble_metrics(
    snapshot: &FundamentalSnapshot,
    indicators: &Indicators,
    score: f64,
) -> CompanyMetrics {
    let profile = snapshot.profile.as_ref();

    CompanyMetrics {
        symbol: snapshot.symbol.clone(),
        company_name: profile.map(|p| p.company_name.clone()),
        sector: profile.and_then(|p| p.sector.clone()),
        market_cap: snapshot.market_cap(),
        pe_ratio: indicators.pe_ratio,
        pb_ratio: indicators.pb_ratio,
        ps_ratio: indicators.ps_ratio,
        ev_ebitda_ratio: indicators.ev_ebitda_ratio,
        ev_fcf_ratio: indicators.ev_fcf_ratio,
        copm: indicators.copm,
        roic: indicators.roic,
        rota: indicators.rota,
        debt_ebitda_ratio: indicators.debt_ebitda_ratio,
        dividend_yield: indicators.dividend_yield,
        dividend_payout: indicators.dividend_payout,
        dividend_growth_10y: indicators.dividend_growth_10y,
        years_increasing_dividend: indicators.years_increasing_dividend,
        score: Some(score),
        created_at: None,
        updated_at: None,
    }
}

/// Compute a symbol's metrics and keep the score breakdown.
///
/// Returns `Ok(None)` when the symbol has neither quarterly income
/// statements nor quarterly balance sheets.
///
/// # Errors
///
/// Propagates storage errors from reading the snapshot.
pub async fn evaluate_company(
    store: &dyn FundamentalsStore,
    symbol: &str,
    as_of: Date,
) -> Result<Option<MetricsReport>> {
    let snapshot = FundamentalSnapshot::load(store, symbol).await?;
    if !snapshot.has_financials() {
        debug!(symbol, "No quarterly statements, skipping");
        return Ok(None);
    }

    let indicators = Indicators::compute(&snapshot, as_of);
    let breakdown = QualityScorer::new().breakdown(&indicators);
    let metrics = assemble_metrics(&snapshot, &indicators, breakdown.total);

    debug!(
        symbol,
        available = indicators.available_count(),
        score = breakdown.total,
        "Computed metrics"
    );

    Ok(Some(MetricsReport { metrics, breakdown }))
}

/// Compute the [`CompanyMetrics`] record for one symbol.
///
/// # Errors
///
/// Propagates storage errors from reading the snapshot.
///
/// # Example
///
/// ```rust,no_run
/// use savvy::{compute_company_metrics, store::MemoryStore};
/// use savvy::Date;
///
/// # async fn run() -> savvy::Result<()> {
/// let store = MemoryStore::new();
/// let as_of = Date::from_ymd_opt(2025, 6, 30).unwrap();
///
/// if let Some(metrics) = compute_company_metrics(&store, "AAPL", as_of).await? {
///     println!("{}: {:?}", metrics.symbol, metrics.score);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn compute_company_metrics(
    store: &dyn FundamentalsStore,
    symbol: &str,
    as_of: Date,
) -> Result<Option<CompanyMetrics>> {
    Ok(evaluate_company(store, symbol, as_of)
        .await?
        .map(|report| report.metrics))
}
