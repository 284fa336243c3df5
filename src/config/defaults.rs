//! Built-in configuration values.
//!
//! These are the tables a category is reset to, and what
//! [`EngineConfig::builtin`](super::EngineConfig::builtin) starts from when no
//! configuration directory is available.

use rust_decimal::Decimal;

use crate::models::{PartCategory, PriceBand};

/// Korean VAT rate (10%).
pub const DEFAULT_VAT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Default KRW per EUR.
pub const DEFAULT_EUR_RATE: Decimal = Decimal::from_parts(1400, 0, 0, false, 0);

/// Default KRW per USD.
pub const DEFAULT_USD_RATE: Decimal = Decimal::from_parts(1300, 0, 0, false, 0);

fn band(min: i64, max: Option<i64>, factor: i64) -> PriceBand {
    PriceBand::new(
        Decimal::new(min, 0),
        max.map(|m| Decimal::new(m, 2)),
        Decimal::new(factor, 2),
    )
}

/// Returns the built-in bands for a category, ascending by `min_price`.
///
/// Repair parts start at 100 (factor 2.10) and consumables at 5 (factor
/// 1.55); both flatten out at 1.20 for expensive items.
pub fn default_bands(category: PartCategory) -> Vec<PriceBand> {
    match category {
        PartCategory::Repair => vec![
            band(100, Some(29999), 210),
            band(300, Some(49999), 195),
            band(500, Some(99999), 180),
            band(1000, Some(199999), 160),
            band(2000, Some(299999), 140),
            band(3000, None, 120),
        ],
        PartCategory::Consumable => vec![
            band(5, Some(1999), 155),
            band(20, Some(4999), 145),
            band(50, Some(9999), 135),
            band(100, Some(29999), 128),
            band(300, None, 120),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_repair_defaults_span_100_to_unbounded() {
        let bands = default_bands(PartCategory::Repair);
        assert_eq!(bands.first().unwrap().min_price, dec("100"));
        assert_eq!(bands.first().unwrap().factor, dec("2.10"));
        assert_eq!(bands.last().unwrap().max_price, None);
        assert_eq!(bands.last().unwrap().factor, dec("1.20"));
    }

    #[test]
    fn test_consumable_defaults_span_5_to_unbounded() {
        let bands = default_bands(PartCategory::Consumable);
        assert_eq!(bands.first().unwrap().min_price, dec("5"));
        assert_eq!(bands.first().unwrap().factor, dec("1.55"));
        assert_eq!(bands.last().unwrap().max_price, None);
        assert_eq!(bands.last().unwrap().factor, dec("1.20"));
    }

    #[test]
    fn test_default_factors_decrease() {
        for category in PartCategory::ALL {
            let bands = default_bands(category);
            assert!(bands.windows(2).all(|w| w[0].factor > w[1].factor));
            assert!(bands.windows(2).all(|w| w[0].min_price < w[1].min_price));
        }
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_VAT_RATE, dec("0.10"));
        assert_eq!(DEFAULT_EUR_RATE, dec("1400"));
        assert_eq!(DEFAULT_USD_RATE, dec("1300"));
    }
}
