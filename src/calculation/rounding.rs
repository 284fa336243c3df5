//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `dp` decimal places, halves away from zero.
pub(crate) fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplies two amounts, clamping at the `Decimal` bounds.
///
/// The flag is true when the product did not fit and was clamped.
pub(crate) fn clamped_product(a: Decimal, b: Decimal) -> (Decimal, bool) {
    match a.checked_mul(b) {
        Some(product) => (product, false),
        None => (a.saturating_mul(b), true),
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
    fn test_half_rounds_away_from_zero() {
        assert_eq!(round_money(dec("2.345"), 2), dec("2.35"));
        assert_eq!(round_money(dec("2.5"), 0), dec("3"));
        assert_eq!(round_money(dec("3.5"), 0), dec("4"));
    }

    #[test]
    fn test_below_half_rounds_down() {
        assert_eq!(round_money(dec("1259999.4999"), 0), dec("1259999"));
        assert_eq!(round_money(dec("10.004"), 2), dec("10.00"));
    }

    #[test]
    fn test_clamped_product_in_range() {
        assert_eq!(clamped_product(dec("900.00"), dec("1400")), (dec("1260000.00"), false));
    }

    #[test]
    fn test_clamped_product_saturates_on_overflow() {
        assert_eq!(clamped_product(Decimal::MAX, dec("2.10")), (Decimal::MAX, true));
        assert_eq!(clamped_product(Decimal::MIN, dec("1300")), (Decimal::MIN, true));
    }
}
