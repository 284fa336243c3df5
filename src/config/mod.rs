//! Configuration loading and management for the Webtranet engine.
//!
//! This module provides functionality to load the pricing configuration from
//! YAML files: price band tables per part category, exchange rates and the
//! VAT rate. The loaded [`EngineConfig`] is passed explicitly to the
//! calculators.
//!
//! # Example
//!
//! ```no_run
//! use webtranet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.settings().name);
//! ```

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_EUR_RATE, DEFAULT_USD_RATE, DEFAULT_VAT_RATE, default_bands};
pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, ExchangeRateTable, ExchangeRatesConfig, PriceBandsConfig,
    PriceTierTable,
};
