//! Request types for the Webtranet engine API.
//!
//! Most endpoints accept the domain models directly; the wrappers here
//! cover bodies that bundle several of them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Currency, Invoice, PartCategory, TimeRecord};

/// Request body for `POST /time-records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRecordsRequest {
    /// The work days to compute, in display order.
    pub records: Vec<TimeRecord>,
}

/// Request body for `POST /pricing/quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The part's cost in `currency`.
    pub original_price: Decimal,
    /// The part category whose band table applies.
    pub category: PartCategory,
    /// The currency the cost is given in. Defaults to EUR.
    #[serde(default)]
    pub currency: Currency,
}

/// Request body for `PUT /pricing/exchange-rates/:currency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateRequest {
    /// KRW per one unit of the currency.
    pub rate: Decimal,
}

/// Request body for `POST /invoices/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryRequest {
    /// The reference day for the month and year-to-date figures.
    pub as_of: NaiveDate,
    /// The invoices to aggregate.
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}
