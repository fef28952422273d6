//! Row builders shared by the calculator tests.

use savvy_traits::{BalanceSheet, CashFlowStatement, Date, Dividend, IncomeStatement, Quote};

pub(crate) fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn quote(price: Option<f64>, market_cap: Option<f64>) -> Quote {
    Quote {
        symbol: "TEST".to_string(),
        price,
        market_cap,
        timestamp: 1_700_000_000,
    }
}

/// `n` quarterly income statements, most recent first.
pub(crate) fn income(n: usize, fill: impl Fn(&mut IncomeStatement)) -> Vec<IncomeStatement> {
    (0..n)
        .map(|i| {
            let mut row = IncomeStatement {
                symbol: "TEST".to_string(),
                date: quarter_end(i),
                period: format!("Q{}", 4 - i % 4),
                ..Default::default()
            };
            fill(&mut row);
            row
        })
        .collect()
}

/// `n` quarterly cash flow statements, most recent first.
pub(crate) fn cash_flows(n: usize, fill: impl Fn(&mut CashFlowStatement)) -> Vec<CashFlowStatement> {
    (0..n)
        .map(|i| {
            let mut row = CashFlowStatement {
                symbol: "TEST".to_string(),
                date: quarter_end(i),
                period: format!("Q{}", 4 - i % 4),
                ..Default::default()
            };
            fill(&mut row);
            row
        })
        .collect()
}

/// A single latest balance sheet.
pub(crate) fn balance_sheet(fill: impl Fn(&mut BalanceSheet)) -> Vec<BalanceSheet> {
    let mut row = BalanceSheet {
        symbol: "TEST".to_string(),
        date: quarter_end(0),
        period: "Q4".to_string(),
        ..Default::default()
    };
    fill(&mut row);
    vec![row]
}

pub(crate) fn dividend(on: Date, amount: f64) -> Dividend {
    Dividend {
        symbol: "TEST".to_string(),
        date: on,
        dividend: Some(amount),
        adj_dividend: Some(amount),
    }
}

fn quarter_end(quarters_back: usize) -> Date {
    let mut d = date(2024, 12, 31);
    for _ in 0..quarters_back {
        d = d - chrono::Months::new(3);
    }
    d
}
