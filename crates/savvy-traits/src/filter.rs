//! Screening filters and pagination over computed metrics.

use serde::{Deserialize, Serialize};

use crate::{CompanyMetrics, Result, SavvyError};

/// Largest page size a listing may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Range filters over [`CompanyMetrics`] rows.
///
/// All bounds are inclusive. A row whose field is unavailable never satisfies
/// a bound on that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsFilter {
    /// Exact sector match.
    pub sector: Option<String>,
    /// Minimum P/E ratio.
    pub min_pe_ratio: Option<f64>,
    /// Maximum P/E ratio.
    pub max_pe_ratio: Option<f64>,
    /// Minimum dividend yield.
    pub min_dividend_yield: Option<f64>,
    /// Maximum dividend yield.
    pub max_dividend_yield: Option<f64>,
    /// Minimum ROIC.
    pub min_roic: Option<f64>,
    /// Maximum ROIC.
    pub max_roic: Option<f64>,
    /// Minimum market cap.
    pub min_market_cap: Option<f64>,
    /// Maximum market cap.
    pub max_market_cap: Option<f64>,
    /// Minimum consecutive years of dividend increases.
    pub min_years_increasing_dividend: Option<i32>,
}

impl MetricsFilter {
    /// Returns whether a row passes every configured bound.
    #[must_use]
    pub fn matches(&self, row: &CompanyMetrics) -> bool {
        if let Some(ref sector) = self.sector
            && row.sector.as_deref() != Some(sector.as_str())
        {
            return false;
        }

        within(row.pe_ratio, self.min_pe_ratio, self.max_pe_ratio)
            && within(
                row.dividend_yield,
                self.min_dividend_yield,
                self.max_dividend_yield,
            )
            && within(row.roic, self.min_roic, self.max_roic)
            && within(row.market_cap, self.min_market_cap, self.max_market_cap)
            && self
                .min_years_increasing_dividend
                .is_none_or(|min| row.years_increasing_dividend.is_some_and(|y| y >= min))
    }
}

fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    value.is_some_and(|v| min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi))
}

/// A validated page request (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns [`SavvyError::InvalidData`] if `page` is zero or `page_size`
    /// is outside `1..=500`.
    pub fn new(page: u32, page_size: u32) -> Result<Self> {
        if page == 0 {
            return Err(SavvyError::InvalidData("page must be >= 1".to_string()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(SavvyError::InvalidData(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a filtered listing, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsPage {
    /// Rows on this page.
    pub items: Vec<CompanyMetrics>,
    /// Number of rows matching the filter across all pages.
    pub total: u64,
    /// The 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of pages.
    pub pages: u64,
}

impl MetricsPage {
    /// Assemble a page, deriving the page count from `total`.
    #[must_use]
    pub fn new(items: Vec<CompanyMetrics>, total: u64, request: PageRequest) -> Self {
        let size = u64::from(request.page_size);
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            pages: total.div_ceil(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str) -> CompanyMetrics {
        CompanyMetrics {
            symbol: symbol.to_string(),
            sector: Some("Technology".to_string()),
            pe_ratio: Some(12.0),
            dividend_yield: Some(0.02),
            roic: Some(0.18),
            market_cap: Some(2.0e9),
            years_increasing_dividend: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(MetricsFilter::default().matches(&row("AAPL")));
        assert!(MetricsFilter::default().matches(&CompanyMetrics::default()));
    }

    #[test]
    fn test_sector_filter() {
        let filter = MetricsFilter {
            sector: Some("Energy".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&row("AAPL")));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let filter = MetricsFilter {
            min_pe_ratio: Some(12.0),
            max_pe_ratio: Some(12.0),
            min_years_increasing_dividend: Some(4),
            ..Default::default()
        };
        assert!(filter.matches(&row("AAPL")));
    }

    #[test]
    fn test_unavailable_field_fails_bound() {
        let filter = MetricsFilter {
            max_pe_ratio: Some(100.0),
            ..Default::default()
        };
        let mut r = row("AAPL");
        r.pe_ratio = None;
        assert!(!filter.matches(&r));

        let filter = MetricsFilter {
            min_years_increasing_dividend: Some(1),
            ..Default::default()
        };
        r.years_increasing_dividend = None;
        assert!(!filter.matches(&r));
    }

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(0, 50).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 501).is_err());

        let req = PageRequest::new(3, 20).unwrap();
        assert_eq!(req.offset(), 40);
        assert_eq!(PageRequest::default().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_count() {
        let req = PageRequest::new(1, 50).unwrap();
        assert_eq!(MetricsPage::new(vec![], 0, req).pages, 0);
        assert_eq!(MetricsPage::new(vec![], 50, req).pages, 1);
        assert_eq!(MetricsPage::new(vec![], 51, req).pages, 2);
    }
}
