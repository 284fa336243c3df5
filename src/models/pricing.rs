//! Spare-part pricing models.
//!
//! This module defines the part categories, billing currencies, price bands
//! and the [`PriceQuote`] produced by the tiered markup calculation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, AuditWarning};

/// The category a spare part is priced under.
///
/// Each category has its own table of price bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    /// Parts replaced during repair work.
    Repair,
    /// Consumables (filters, nozzles, lenses, ...).
    Consumable,
}

impl PartCategory {
    /// All categories, in table order.
    pub const ALL: [PartCategory; 2] = [PartCategory::Repair, PartCategory::Consumable];

    /// Returns the lowercase name used in configuration files and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartCategory::Repair => "repair",
            PartCategory::Consumable => "consumable",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A currency a part cost can be quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro. Most LVD parts are sourced in EUR.
    #[default]
    Eur,
    /// US dollar.
    Usd,
    /// Korean won, the billing currency.
    Krw,
}

impl Currency {
    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Krw => "KRW",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A price interval mapped to a markup factor.
///
/// Both bounds are inclusive. A `max_price` of `None` means the band is
/// open-ended ("and above").
///
/// # Example
///
/// ```
/// use webtranet_engine::models::PriceBand;
/// use rust_decimal::Decimal;
///
/// let band = PriceBand::new(Decimal::new(3000, 0), None, Decimal::new(120, 2));
/// assert!(band.contains(Decimal::new(1_000_000, 0)));
/// assert!(!band.contains(Decimal::new(2999, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    /// Lowest price in the band (inclusive).
    pub min_price: Decimal,
    /// Highest price in the band (inclusive), or `None` for unbounded.
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Multiplier applied to the original cost.
    pub factor: Decimal,
}

impl PriceBand {
    /// Creates a new band.
    pub fn new(min_price: Decimal, max_price: Option<Decimal>, factor: Decimal) -> Self {
        Self {
            min_price,
            max_price,
            factor,
        }
    }

    /// Returns true if `price` lies within the band.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min_price && self.max_price.is_none_or(|max| price <= max)
    }

    /// Returns true if the two bands share at least one price.
    pub fn overlaps(&self, other: &PriceBand) -> bool {
        let self_below_other = self.max_price.is_some_and(|max| max < other.min_price);
        let other_below_self = other.max_price.is_some_and(|max| max < self.min_price);
        !self_below_other && !other_below_self
    }
}

/// A single-field edit to a band.
///
/// Serialized as `{"field": "factor", "value": "1.75"}`; a `max_price` value
/// of `null` makes the band unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum BandUpdate {
    /// Replace the lower bound.
    MinPrice(Decimal),
    /// Replace the upper bound; `None` removes it.
    MaxPrice(Option<Decimal>),
    /// Replace the markup factor.
    Factor(Decimal),
}

/// The outcome of pricing one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The part's cost in its source currency.
    pub original_price: Decimal,
    /// The source currency.
    pub currency: Currency,
    /// The category whose table was used.
    pub category: PartCategory,
    /// The selected markup factor (1.0 when no band matched).
    pub factor: Decimal,
    /// Index of the matching band, if any.
    pub matched_band: Option<usize>,
    /// `original_price * factor`, rounded to 2 decimal places.
    pub billed_price: Decimal,
    /// `billed_price` converted to KRW, rounded to a whole won.
    pub billed_price_krw: Decimal,
    /// How the price was derived.
    pub audit_steps: Vec<AuditStep>,
    /// Table problems noticed while pricing.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_band_contains_is_inclusive_on_both_ends() {
        let band = PriceBand::new(dec("100"), Some(dec("299.99")), dec("2.10"));
        assert!(band.contains(dec("100")));
        assert!(band.contains(dec("299.99")));
        assert!(!band.contains(dec("99.99")));
        assert!(!band.contains(dec("300")));
    }

    #[test]
    fn test_unbounded_band_contains_everything_above_min() {
        let band = PriceBand::new(dec("300"), None, dec("1.20"));
        assert!(band.contains(dec("300")));
        assert!(band.contains(dec("99999999")));
    }

    #[test]
    fn test_band_overlaps() {
        let low = PriceBand::new(dec("0"), Some(dec("100")), dec("1.5"));
        let touching = PriceBand::new(dec("100"), Some(dec("200")), dec("1.3"));
        let apart = PriceBand::new(dec("100.01"), None, dec("1.2"));

        assert!(low.overlaps(&touching));
        assert!(touching.overlaps(&low));
        assert!(!low.overlaps(&apart));
        assert!(touching.overlaps(&apart));
    }

    #[test]
    fn test_part_category_serialization() {
        assert_eq!(
            serde_json::to_string(&PartCategory::Consumable).unwrap(),
            "\"consumable\""
        );
        let category: PartCategory = serde_json::from_str("\"repair\"").unwrap();
        assert_eq!(category, PartCategory::Repair);
    }

    #[test]
    fn test_currency_serialization() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        let currency: Currency = serde_json::from_str("\"KRW\"").unwrap();
        assert_eq!(currency, Currency::Krw);
        assert_eq!(Currency::default(), Currency::Eur);
    }

    #[test]
    fn test_band_update_deserialization() {
        let update: BandUpdate =
            serde_json::from_str(r#"{"field": "factor", "value": "1.75"}"#).unwrap();
        assert_eq!(update, BandUpdate::Factor(dec("1.75")));

        let update: BandUpdate =
            serde_json::from_str(r#"{"field": "max_price", "value": null}"#).unwrap();
        assert_eq!(update, BandUpdate::MaxPrice(None));
    }

    #[test]
    fn test_band_max_price_defaults_to_unbounded() {
        let band: PriceBand =
            serde_json::from_str(r#"{"min_price": "3000", "factor": "1.20"}"#).unwrap();
        assert_eq!(band.max_price, None);
    }
}
