//! Error types for the Webtranet engine.
//!
//! The calculators themselves never fail: malformed time strings degrade to
//! zero minutes and unmatched prices fall back to a factor of 1.0. The errors
//! below cover the fallible edges around them: loading configuration, editing
//! band and exchange-rate tables, and validating invoices.

use thiserror::Error;

use crate::models::{Currency, PartCategory};

/// The main error type for the Webtranet engine.
///
/// # Example
///
/// ```
/// use webtranet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/price_bands.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/price_bands.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A band index did not refer to an existing band in the table.
    #[error("Band index {index} out of range for {category} table ({len} bands)")]
    BandIndexOutOfRange {
        /// The category whose table was addressed.
        category: PartCategory,
        /// The requested index.
        index: usize,
        /// The number of bands in the table.
        len: usize,
    },

    /// A band value was rejected.
    #[error("Invalid {category} band: {message}")]
    InvalidBand {
        /// The category whose table was being edited.
        category: PartCategory,
        /// A description of what made the band invalid.
        message: String,
    },

    /// The KRW rate is pinned to 1 and cannot be edited.
    #[error("Exchange rate for {currency} is fixed and cannot be changed")]
    FixedExchangeRate {
        /// The currency whose rate was targeted.
        currency: Currency,
    },

    /// An exchange rate value was rejected.
    #[error("Invalid exchange rate for {currency}: {message}")]
    InvalidExchangeRate {
        /// The currency whose rate was being set.
        currency: Currency,
        /// A description of what made the rate invalid.
        message: String,
    },

    /// An invoice contained inconsistent data.
    #[error("Invalid invoice '{invoice_number}': {message}")]
    InvalidInvoice {
        /// The number of the offending invoice.
        invoice_number: String,
        /// A description of what made the invoice invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
