//! Configuration types for pricing and invoicing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! editing operations a settings screen performs on them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BandUpdate, Currency, PartCategory, PriceBand};

use super::defaults::{DEFAULT_EUR_RATE, DEFAULT_USD_RATE, DEFAULT_VAT_RATE, default_bands};

/// General engine settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// The name of the deployment (e.g., "LVD Korea Webtranet").
    pub name: String,
    /// The version or effective date of this configuration.
    pub version: String,
    /// VAT rate applied to invoice supply amounts.
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
}

fn default_vat_rate() -> Decimal {
    DEFAULT_VAT_RATE
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "LVD Korea Webtranet".to_string(),
            version: "builtin".to_string(),
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

/// Price band tables file structure (`price_bands.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PriceBandsConfig {
    /// Bands for repair parts, in lookup order.
    pub repair: Vec<PriceBand>,
    /// Bands for consumables, in lookup order.
    pub consumable: Vec<PriceBand>,
}

/// The ordered band table for one part category.
///
/// Lookup is first-match in table order, so the order of bands is part of
/// the table's meaning. No operation here reorders bands except
/// [`sort_by_min_price`](Self::sort_by_min_price).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceTierTable {
    category: PartCategory,
    bands: Vec<PriceBand>,
}

impl PriceTierTable {
    /// Creates a table for `category` holding `bands` in the given order.
    pub fn new(category: PartCategory, bands: Vec<PriceBand>) -> Self {
        Self { category, bands }
    }

    /// Creates a table holding the built-in bands for `category`.
    pub fn builtin(category: PartCategory) -> Self {
        Self::new(category, default_bands(category))
    }

    /// Returns the category this table prices.
    pub fn category(&self) -> PartCategory {
        self.category
    }

    /// Returns the bands in lookup order.
    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }

    /// Returns the number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns true if the table has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Appends a band to the end of the table and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBand` if the factor is below 1 or a bound is negative.
    pub fn add_band(&mut self, band: PriceBand) -> EngineResult<usize> {
        self.validate(&band)?;
        self.bands.push(band);
        Ok(self.bands.len() - 1)
    }

    /// Removes the band at `index`; later bands shift down by one.
    pub fn remove_band(&mut self, index: usize) -> EngineResult<PriceBand> {
        self.check_index(index)?;
        Ok(self.bands.remove(index))
    }

    /// Applies a single-field edit to the band at `index`.
    ///
    /// The band keeps its position. The edit is rejected, leaving the band
    /// untouched, if the result would be invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use webtranet_engine::config::PriceTierTable;
    /// use webtranet_engine::models::{BandUpdate, PartCategory};
    /// use rust_decimal::Decimal;
    ///
    /// let mut table = PriceTierTable::builtin(PartCategory::Repair);
    /// table.update_band(0, BandUpdate::Factor(Decimal::new(225, 2)))?;
    /// assert_eq!(table.bands()[0].factor, Decimal::new(225, 2));
    /// # Ok::<(), webtranet_engine::error::EngineError>(())
    /// ```
    pub fn update_band(&mut self, index: usize, update: BandUpdate) -> EngineResult<&PriceBand> {
        self.check_index(index)?;

        let mut band = self.bands[index].clone();
        match update {
            BandUpdate::MinPrice(value) => band.min_price = value,
            BandUpdate::MaxPrice(value) => band.max_price = value,
            BandUpdate::Factor(value) => band.factor = value,
        }
        self.validate(&band)?;

        self.bands[index] = band;
        Ok(&self.bands[index])
    }

    /// Replaces the table contents with the built-in bands for its category.
    pub fn reset_to_default(&mut self) {
        self.bands = default_bands(self.category);
    }

    /// Returns true if bands are ascending by `min_price`.
    pub fn is_sorted(&self) -> bool {
        self.bands
            .windows(2)
            .all(|pair| pair[0].min_price <= pair[1].min_price)
    }

    /// Stable-sorts the bands ascending by `min_price`.
    pub fn sort_by_min_price(&mut self) {
        self.bands.sort_by(|a, b| a.min_price.cmp(&b.min_price));
    }

    /// Returns the index pairs of bands that share at least one price.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.bands.iter().enumerate() {
            for (j, b) in self.bands.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn check_index(&self, index: usize) -> EngineResult<()> {
        if index >= self.bands.len() {
            return Err(EngineError::BandIndexOutOfRange {
                category: self.category,
                index,
                len: self.bands.len(),
            });
        }
        Ok(())
    }

    fn validate(&self, band: &PriceBand) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidBand {
            category: self.category,
            message,
        };

        if band.factor < Decimal::ONE {
            return Err(invalid(format!(
                "factor must be at least 1, got {}",
                band.factor
            )));
        }
        if band.min_price < Decimal::ZERO {
            return Err(invalid(format!(
                "min_price must not be negative, got {}",
                band.min_price
            )));
        }
        if let Some(max) = band.max_price.filter(|max| *max < Decimal::ZERO) {
            return Err(invalid(format!("max_price must not be negative, got {}", max)));
        }
        Ok(())
    }
}

/// KRW-per-unit exchange rates.
///
/// KRW itself is pinned at 1 and is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    /// KRW per EUR.
    #[serde(rename = "EUR")]
    eur: Decimal,
    /// KRW per USD.
    #[serde(rename = "USD")]
    usd: Decimal,
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self {
            eur: DEFAULT_EUR_RATE,
            usd: DEFAULT_USD_RATE,
        }
    }
}

impl ExchangeRateTable {
    /// Creates a table with explicit EUR and USD rates.
    pub fn new(eur: Decimal, usd: Decimal) -> EngineResult<Self> {
        let mut table = Self::default();
        table.set_rate(Currency::Eur, eur)?;
        table.set_rate(Currency::Usd, usd)?;
        Ok(table)
    }

    /// Returns the KRW value of one unit of `currency`.
    pub fn rate(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Eur => self.eur,
            Currency::Usd => self.usd,
            Currency::Krw => Decimal::ONE,
        }
    }

    /// Sets the KRW value of one unit of `currency`.
    ///
    /// # Errors
    ///
    /// - `FixedExchangeRate` for KRW
    /// - `InvalidExchangeRate` if `rate` is zero or negative
    pub fn set_rate(&mut self, currency: Currency, rate: Decimal) -> EngineResult<()> {
        let slot = match currency {
            Currency::Eur => &mut self.eur,
            Currency::Usd => &mut self.usd,
            Currency::Krw => return Err(EngineError::FixedExchangeRate { currency }),
        };
        if rate <= Decimal::ZERO {
            return Err(EngineError::InvalidExchangeRate {
                currency,
                message: format!("rate must be positive, got {}", rate),
            });
        }
        *slot = rate;
        Ok(())
    }
}

/// Exchange rates file structure (`exchange_rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRatesConfig {
    /// KRW per unit of each foreign currency.
    pub rates: ExchangeRateTable,
}

/// The complete engine configuration.
///
/// This is the object the pricing and invoicing calculators are handed; it
/// is never held in global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    settings: EngineSettings,
    repair: PriceTierTable,
    consumable: PriceTierTable,
    exchange_rates: ExchangeRateTable,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        settings: EngineSettings,
        bands: PriceBandsConfig,
        exchange_rates: ExchangeRateTable,
    ) -> Self {
        Self {
            settings,
            repair: PriceTierTable::new(PartCategory::Repair, bands.repair),
            consumable: PriceTierTable::new(PartCategory::Consumable, bands.consumable),
            exchange_rates,
        }
    }

    /// Returns the built-in configuration.
    pub fn builtin() -> Self {
        Self {
            settings: EngineSettings::default(),
            repair: PriceTierTable::builtin(PartCategory::Repair),
            consumable: PriceTierTable::builtin(PartCategory::Consumable),
            exchange_rates: ExchangeRateTable::default(),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the VAT rate.
    pub fn vat_rate(&self) -> Decimal {
        self.settings.vat_rate
    }

    /// Returns the band table for a category.
    pub fn bands(&self, category: PartCategory) -> &PriceTierTable {
        match category {
            PartCategory::Repair => &self.repair,
            PartCategory::Consumable => &self.consumable,
        }
    }

    /// Returns the band table for a category, for editing.
    pub fn bands_mut(&mut self, category: PartCategory) -> &mut PriceTierTable {
        match category {
            PartCategory::Repair => &mut self.repair,
            PartCategory::Consumable => &mut self.consumable,
        }
    }

    /// Returns the exchange-rate table.
    pub fn exchange_rates(&self) -> &ExchangeRateTable {
        &self.exchange_rates
    }

    /// Returns the exchange-rate table, for editing.
    pub fn exchange_rates_mut(&mut self) -> &mut ExchangeRateTable {
        &mut self.exchange_rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band(min: &str, max: Option<&str>, factor: &str) -> PriceBand {
        PriceBand::new(dec(min), max.map(dec), dec(factor))
    }

    #[test]
    fn test_add_band_appends() {
        let mut table = PriceTierTable::builtin(PartCategory::Consumable);
        let before = table.len();

        let index = table.add_band(band("0", Some("4.99"), "2.00")).unwrap();

        assert_eq!(index, before);
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.bands()[index].factor, dec("2.00"));
        assert!(!table.is_sorted());
    }

    #[test]
    fn test_add_band_rejects_factor_below_one() {
        let mut table = PriceTierTable::new(PartCategory::Repair, vec![]);
        let result = table.add_band(band("0", None, "0.95"));

        match result {
            Err(EngineError::InvalidBand { category, message }) => {
                assert_eq!(category, PartCategory::Repair);
                assert!(message.contains("factor"));
            }
            other => panic!("Expected InvalidBand, got {:?}", other),
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_add_band_rejects_negative_bounds() {
        let mut table = PriceTierTable::new(PartCategory::Repair, vec![]);
        assert!(table.add_band(band("-1", None, "1.5")).is_err());
        assert!(table.add_band(band("0", Some("-5"), "1.5")).is_err());
    }

    #[test]
    fn test_remove_band_keeps_order_of_remaining() {
        let mut table = PriceTierTable::builtin(PartCategory::Repair);
        let removed = table.remove_band(1).unwrap();

        assert_eq!(removed.factor, dec("1.95"));
        assert_eq!(table.bands()[0].factor, dec("2.10"));
        assert_eq!(table.bands()[1].factor, dec("1.80"));
    }

    #[test]
    fn test_remove_band_out_of_range() {
        let mut table = PriceTierTable::builtin(PartCategory::Repair);
        match table.remove_band(6) {
            Err(EngineError::BandIndexOutOfRange { index, len, .. }) => {
                assert_eq!(index, 6);
                assert_eq!(len, 6);
            }
            other => panic!("Expected BandIndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_update_band_each_field() {
        let mut table = PriceTierTable::builtin(PartCategory::Repair);

        table.update_band(2, BandUpdate::MinPrice(dec("450"))).unwrap();
        table.update_band(2, BandUpdate::MaxPrice(None)).unwrap();
        table.update_band(2, BandUpdate::Factor(dec("1.85"))).unwrap();

        assert_eq!(table.bands()[2], band("450", None, "1.85"));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_update_band_rejected_leaves_band_untouched() {
        let mut table = PriceTierTable::builtin(PartCategory::Repair);
        let before = table.bands()[0].clone();

        assert!(table.update_band(0, BandUpdate::Factor(dec("0.5"))).is_err());
        assert_eq!(table.bands()[0], before);
    }

    #[test]
    fn test_update_band_out_of_range() {
        let mut table = PriceTierTable::new(PartCategory::Consumable, vec![]);
        assert!(matches!(
            table.update_band(0, BandUpdate::Factor(dec("1.5"))),
            Err(EngineError::BandIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_reset_to_default_restores_builtin() {
        let mut table = PriceTierTable::builtin(PartCategory::Consumable);
        table.remove_band(0).unwrap();
        table.add_band(band("0", None, "3.00")).unwrap();

        table.reset_to_default();

        assert_eq!(table, PriceTierTable::builtin(PartCategory::Consumable));
    }

    #[test]
    fn test_sort_by_min_price() {
        let mut table = PriceTierTable::new(
            PartCategory::Repair,
            vec![
                band("500", None, "1.5"),
                band("0", Some("499.99"), "2.0"),
            ],
        );
        assert!(!table.is_sorted());

        table.sort_by_min_price();

        assert!(table.is_sorted());
        assert_eq!(table.bands()[0].factor, dec("2.0"));
    }

    #[test]
    fn test_overlapping_pairs() {
        let table = PriceTierTable::new(
            PartCategory::Repair,
            vec![
                band("0", Some("100"), "2.0"),
                band("50", Some("150"), "1.8"),
                band("200", None, "1.2"),
            ],
        );
        assert_eq!(table.overlapping_pairs(), vec![(0, 1)]);
        assert!(PriceTierTable::builtin(PartCategory::Repair).overlapping_pairs().is_empty());
    }

    #[test]
    fn test_exchange_rate_krw_is_fixed() {
        let mut rates = ExchangeRateTable::default();
        assert_eq!(rates.rate(Currency::Krw), Decimal::ONE);

        let result = rates.set_rate(Currency::Krw, dec("2"));
        assert!(matches!(
            result,
            Err(EngineError::FixedExchangeRate {
                currency: Currency::Krw
            })
        ));
        assert_eq!(rates.rate(Currency::Krw), Decimal::ONE);
    }

    #[test]
    fn test_exchange_rate_set_and_get() {
        let mut rates = ExchangeRateTable::default();
        rates.set_rate(Currency::Usd, dec("1385.50")).unwrap();
        assert_eq!(rates.rate(Currency::Usd), dec("1385.50"));
        assert_eq!(rates.rate(Currency::Eur), dec("1400"));
    }

    #[test]
    fn test_exchange_rate_rejects_non_positive() {
        let mut rates = ExchangeRateTable::default();
        assert!(matches!(
            rates.set_rate(Currency::Eur, Decimal::ZERO),
            Err(EngineError::InvalidExchangeRate { .. })
        ));
        assert!(ExchangeRateTable::new(dec("-1"), dec("1300")).is_err());
    }

    #[test]
    fn test_exchange_rate_table_deserialization() {
        let rates: ExchangeRateTable =
            serde_yaml::from_str("EUR: \"1450.25\"\nUSD: \"1310\"\n").unwrap();
        assert_eq!(rates.rate(Currency::Eur), dec("1450.25"));
        assert_eq!(rates.rate(Currency::Usd), dec("1310"));
    }

    #[test]
    fn test_engine_config_bands_by_category() {
        let mut config = EngineConfig::builtin();
        assert_eq!(config.bands(PartCategory::Repair).category(), PartCategory::Repair);
        assert_eq!(config.bands(PartCategory::Consumable).len(), 5);

        config
            .bands_mut(PartCategory::Consumable)
            .remove_band(0)
            .unwrap();
        assert_eq!(config.bands(PartCategory::Consumable).len(), 4);
        assert_eq!(config.bands(PartCategory::Repair).len(), 6);
        assert_eq!(config.vat_rate(), dec("0.10"));
    }
}
