//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, PartCategory};

use super::types::{
    EngineConfig, EngineSettings, ExchangeRateTable, ExchangeRatesConfig, PriceBandsConfig,
    PriceTierTable,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Deployment name, version, VAT rate
/// ├── price_bands.yaml     # Repair and consumable band tables
/// └── exchange_rates.yaml  # KRW per EUR / USD
/// ```
///
/// # Example
///
/// ```no_run
/// use webtranet_engine::config::ConfigLoader;
/// use webtranet_engine::models::{Currency, PartCategory};
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Repair bands: {}", loader.get_bands(PartCategory::Repair).len());
/// println!("EUR rate: {}", loader.get_exchange_rate(Currency::Eur));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A band or exchange rate fails validation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use webtranet_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), webtranet_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;

        let bands_path = path.join("price_bands.yaml");
        let bands = Self::load_yaml::<PriceBandsConfig>(&bands_path)?;
        let bands = Self::validate_bands(&bands_path, bands)?;

        let rates_path = path.join("exchange_rates.yaml");
        let rates = Self::load_yaml::<ExchangeRatesConfig>(&rates_path)?;
        let rates = Self::validate_rates(&rates_path, rates.rates)?;

        let config = EngineConfig::new(settings, bands, rates);

        info!(
            path = %path.display(),
            name = %config.settings().name,
            version = %config.settings().version,
            repair_bands = config.bands(PartCategory::Repair).len(),
            consumable_bands = config.bands(PartCategory::Consumable).len(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Returns a loader holding the built-in configuration.
    pub fn builtin() -> Self {
        Self {
            config: EngineConfig::builtin(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Re-adds every band through the table's validation.
    fn validate_bands(path: &Path, bands: PriceBandsConfig) -> EngineResult<PriceBandsConfig> {
        let parse_error = |e: EngineError| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut repair = PriceTierTable::new(PartCategory::Repair, Vec::new());
        for band in bands.repair {
            repair.add_band(band).map_err(parse_error)?;
        }
        let mut consumable = PriceTierTable::new(PartCategory::Consumable, Vec::new());
        for band in bands.consumable {
            consumable.add_band(band).map_err(parse_error)?;
        }

        Ok(PriceBandsConfig {
            repair: repair.bands().to_vec(),
            consumable: consumable.bands().to_vec(),
        })
    }

    fn validate_rates(path: &Path, rates: ExchangeRateTable) -> EngineResult<ExchangeRateTable> {
        ExchangeRateTable::new(rates.rate(Currency::Eur), rates.rate(Currency::Usd)).map_err(|e| {
            EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the underlying engine configuration, for editing.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Gets the band table for a part category.
    pub fn get_bands(&self, category: PartCategory) -> &PriceTierTable {
        self.config.bands(category)
    }

    /// Gets the KRW value of one unit of `currency`.
    pub fn get_exchange_rate(&self, currency: Currency) -> Decimal {
        self.config.exchange_rates().rate(currency)
    }

    /// Gets the VAT rate applied to invoices.
    pub fn get_vat_rate(&self) -> Decimal {
        self.config.vat_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_config(dir: &TempDir, bands: &str, rates: &str) {
        fs::write(
            dir.path().join("engine.yaml"),
            "name: Test\nversion: \"t1\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("price_bands.yaml"), bands).unwrap();
        fs::write(dir.path().join("exchange_rates.yaml"), rates).unwrap();
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().name, "LVD Korea Webtranet");
        assert_eq!(loader.get_vat_rate(), dec("0.10"));
    }

    #[test]
    fn test_shipped_config_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let builtin = EngineConfig::builtin();

        for category in PartCategory::ALL {
            assert_eq!(loader.get_bands(category), builtin.bands(category));
        }
        assert_eq!(loader.config().exchange_rates(), builtin.exchange_rates());
    }

    #[test]
    fn test_exchange_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.get_exchange_rate(Currency::Eur), dec("1400"));
        assert_eq!(loader.get_exchange_rate(Currency::Usd), dec("1300"));
        assert_eq!(loader.get_exchange_rate(Currency::Krw), dec("1"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_custom_directory() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "repair:\n  - min_price: \"0\"\n    factor: \"1.5\"\nconsumable: []\n",
            "rates:\n  EUR: \"1500\"\n  USD: \"1350\"\n",
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();

        assert_eq!(loader.get_bands(PartCategory::Repair).len(), 1);
        assert_eq!(loader.get_bands(PartCategory::Repair).bands()[0].max_price, None);
        assert!(loader.get_bands(PartCategory::Consumable).is_empty());
        assert_eq!(loader.get_exchange_rate(Currency::Eur), dec("1500"));
        assert_eq!(loader.get_vat_rate(), dec("0.10"));
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "repair: [ this is not", "rates:\n  EUR: \"1\"\n  USD: \"1\"\n");

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("price_bands.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_band_with_factor_below_one() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "repair:\n  - min_price: \"0\"\n    factor: \"0.8\"\nconsumable: []\n",
            "rates:\n  EUR: \"1400\"\n  USD: \"1300\"\n",
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("factor"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_zero_exchange_rate() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "repair: []\nconsumable: []\n",
            "rates:\n  EUR: \"0\"\n  USD: \"1300\"\n",
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("exchange_rates.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_loader_needs_no_files() {
        let loader = ConfigLoader::builtin();
        assert_eq!(loader.get_bands(PartCategory::Repair).len(), 6);
        assert_eq!(loader.get_exchange_rate(Currency::Eur), dec("1400"));
    }

    #[test]
    fn test_config_mut_edits_are_visible() {
        let mut loader = ConfigLoader::builtin();
        loader
            .config_mut()
            .exchange_rates_mut()
            .set_rate(Currency::Eur, dec("1475"))
            .unwrap();
        assert_eq!(loader.get_exchange_rate(Currency::Eur), dec("1475"));
    }
}
