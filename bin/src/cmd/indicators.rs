//! Indicator listing command implementation.

use anyhow::{Result, bail};
use savvy::metrics::registry::{
    IndicatorCategory, IndicatorInfo, get_indicator_info, indicators_by_category,
};
use savvy::score::curve_for;

use crate::cmd::banner;

/// List available indicators, optionally filtered by category, or describe
/// a single indicator by column name.
pub(crate) fn run(category: Option<&str>, name: Option<&str>, verbose: bool) -> Result<()> {
    if let Some(name) = name {
        let info = lookup(name)?;
        banner(info.indicator.label());
        print_info(&info, true);
        println!();
        return Ok(());
    }

    let categories = match category {
        Some(name) => vec![name.parse::<IndicatorCategory>()?],
        None => IndicatorCategory::ALL.to_vec(),
    };

    banner("Available Indicators");

    for cat in categories {
        println!("{} - {}", cat.as_str(), cat.description());
        println!("{}", "-".repeat(60));

        for info in indicators_by_category(cat) {
            print_info(&info, verbose);
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for descriptions and scoring curves.\n");
    }

    Ok(())
}

fn lookup(name: &str) -> Result<IndicatorInfo> {
    match get_indicator_info(name.trim()) {
        Some(info) => Ok(info),
        None => bail!("Unknown indicator: {name} (run `savvy indicators` for the list)"),
    }
}

fn print_info(info: &IndicatorInfo, verbose: bool) {
    if verbose {
        let ttm = if info.requires_ttm { " [TTM]" } else { "" };
        println!("  {:28} {}{ttm}", info.name, info.description);
        if let Some(rule) = curve_for(info.indicator) {
            println!("  {:28} scoring: {:?}", "", rule.curve);
        }
    } else {
        println!("  {:28} {}", info.name, info.indicator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savvy::metrics::Indicator;

    #[test]
    fn test_lookup_by_column_name() {
        let info = lookup("ev_ebitda_ratio").unwrap();
        assert_eq!(info.indicator, Indicator::EvEbitdaRatio);
        assert_eq!(info.category, IndicatorCategory::EnterpriseValue);
        assert!(info.requires_ttm);
        assert!(curve_for(info.indicator).is_some());
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup("price_to_magic").is_err());
    }
}
