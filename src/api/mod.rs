//! HTTP API module for the Webtranet engine.
//!
//! This module exposes the time ledger, part pricing and invoice totals
//! calculators as JSON endpoints, together with the band-table and
//! exchange-rate settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExchangeRateRequest, PeriodSummaryRequest, QuoteRequest, TimeRecordsRequest};
pub use response::{
    ApiError, ApiErrorResponse, BandTableResponse, ExchangeRatesResponse, TimeRecordsResponse,
};
pub use state::AppState;
