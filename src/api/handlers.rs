//! HTTP request handlers for the Webtranet engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_invoice_totals, calculate_price, summarize_period, summarize_time_records,
};
use crate::models::{
    BandUpdate, Currency, Invoice, PartCategory, PriceBand, TimeLedgerEntry, TimeRecord,
};

use super::request::{ExchangeRateRequest, PeriodSummaryRequest, QuoteRequest, TimeRecordsRequest};
use super::response::{
    ApiErrorResponse, BandTableResponse, ExchangeRatesResponse, TimeRecordsResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/time-records", post(time_records_handler))
        .route("/pricing/quote", post(quote_handler))
        .route(
            "/pricing/bands/:category",
            get(get_bands_handler).post(add_band_handler),
        )
        .route("/pricing/bands/:category/reset", post(reset_bands_handler))
        .route(
            "/pricing/bands/:category/:index",
            patch(update_band_handler).delete(remove_band_handler),
        )
        .route("/pricing/exchange-rates", get(get_exchange_rates_handler))
        .route(
            "/pricing/exchange-rates/:currency",
            put(set_exchange_rate_handler),
        )
        .route("/invoices/totals", post(invoice_totals_handler))
        .route("/invoices/summary", post(period_summary_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Rejected request body"
        );
        rejection.into()
    })
}

fn parse_path<T>(
    correlation_id: Uuid,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    path.map(|Path(value)| value).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Rejected path parameter"
        );
        rejection.into()
    })
}

fn engine_failure(correlation_id: Uuid, error: crate::error::EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Handler for POST /time-records.
///
/// Computes worked and travel time for each record and returns the
/// persisted forms with batch totals.
async fn time_records_handler(
    payload: Result<Json<TimeRecordsRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time records request");

    let request = parse_body(correlation_id, payload)?;

    let start_time = Instant::now();
    let entries: Vec<TimeLedgerEntry> = request.records.iter().map(TimeRecord::compute).collect();
    let summary = summarize_time_records(&entries);
    let records = entries.iter().map(TimeLedgerEntry::to_persisted).collect();

    info!(
        correlation_id = %correlation_id,
        days = summary.days,
        total_worked = %summary.total_worked,
        total_travel = %summary.total_travel,
        duration_us = start_time.elapsed().as_micros(),
        "Time records computed"
    );

    Ok(json_ok(TimeRecordsResponse { records, summary }))
}

/// Handler for POST /pricing/quote.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = parse_body(correlation_id, payload)?;

    let start_time = Instant::now();
    let quote = {
        let config = state.config().await;
        calculate_price(
            request.original_price,
            request.category,
            request.currency,
            config.config(),
        )
    };

    for warning in &quote.warnings {
        warn!(
            correlation_id = %correlation_id,
            code = %warning.code,
            "{}",
            warning.message
        );
    }
    info!(
        correlation_id = %correlation_id,
        category = %quote.category,
        original_price = %quote.original_price,
        factor = %quote.factor,
        billed_price_krw = %quote.billed_price_krw,
        duration_us = start_time.elapsed().as_micros(),
        "Quote calculated"
    );

    Ok(json_ok(quote))
}

/// Handler for GET /pricing/bands/:category.
async fn get_bands_handler(
    State(state): State<AppState>,
    path: Result<Path<PartCategory>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let category = parse_path(correlation_id, path)?;

    let config = state.config().await;
    Ok(json_ok(BandTableResponse::from(config.get_bands(category))))
}

/// Handler for POST /pricing/bands/:category.
///
/// Appends the band to the end of the table.
async fn add_band_handler(
    State(state): State<AppState>,
    path: Result<Path<PartCategory>, PathRejection>,
    payload: Result<Json<PriceBand>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let category = parse_path(correlation_id, path)?;
    let band = parse_body(correlation_id, payload)?;

    let mut config = state.config_mut().await;
    let table = config.config_mut().bands_mut(category);
    let index = table
        .add_band(band)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, %category, index, "Price band added");
    Ok(json_ok(BandTableResponse::from(&*table)))
}

/// Handler for PATCH /pricing/bands/:category/:index.
async fn update_band_handler(
    State(state): State<AppState>,
    path: Result<Path<(PartCategory, usize)>, PathRejection>,
    payload: Result<Json<BandUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let (category, index) = parse_path(correlation_id, path)?;
    let update = parse_body(correlation_id, payload)?;

    let mut config = state.config_mut().await;
    let table = config.config_mut().bands_mut(category);
    table
        .update_band(index, update)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, %category, index, "Price band updated");
    Ok(json_ok(BandTableResponse::from(&*table)))
}

/// Handler for DELETE /pricing/bands/:category/:index.
async fn remove_band_handler(
    State(state): State<AppState>,
    path: Result<Path<(PartCategory, usize)>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let (category, index) = parse_path(correlation_id, path)?;

    let mut config = state.config_mut().await;
    let table = config.config_mut().bands_mut(category);
    let removed = table
        .remove_band(index)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        %category,
        index,
        min_price = %removed.min_price,
        "Price band removed"
    );
    Ok(json_ok(BandTableResponse::from(&*table)))
}

/// Handler for POST /pricing/bands/:category/reset.
async fn reset_bands_handler(
    State(state): State<AppState>,
    path: Result<Path<PartCategory>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let category = parse_path(correlation_id, path)?;

    let mut config = state.config_mut().await;
    let table = config.config_mut().bands_mut(category);
    table.reset_to_default();

    info!(correlation_id = %correlation_id, %category, "Price bands reset to defaults");
    Ok(json_ok(BandTableResponse::from(&*table)))
}

/// Handler for GET /pricing/exchange-rates.
async fn get_exchange_rates_handler(State(state): State<AppState>) -> HandlerResult {
    let config = state.config().await;
    Ok(json_ok(ExchangeRatesResponse::from(
        config.config().exchange_rates(),
    )))
}

/// Handler for PUT /pricing/exchange-rates/:currency.
async fn set_exchange_rate_handler(
    State(state): State<AppState>,
    path: Result<Path<Currency>, PathRejection>,
    payload: Result<Json<ExchangeRateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let currency = parse_path(correlation_id, path)?;
    let request = parse_body(correlation_id, payload)?;

    let mut config = state.config_mut().await;
    let rates = config.config_mut().exchange_rates_mut();
    rates
        .set_rate(currency, request.rate)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, %currency, rate = %request.rate, "Exchange rate updated");
    Ok(json_ok(ExchangeRatesResponse::from(&*rates)))
}

/// Handler for POST /invoices/totals.
async fn invoice_totals_handler(
    State(state): State<AppState>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice totals request");

    let invoice = parse_body(correlation_id, payload)?;
    let vat_rate = state.config().await.get_vat_rate();

    let totals = calculate_invoice_totals(&invoice, vat_rate)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        invoice_number = %invoice.invoice_number,
        lines = invoice.lines.len(),
        total = %totals.total,
        "Invoice totals calculated"
    );
    Ok(json_ok(totals))
}

/// Handler for POST /invoices/summary.
async fn period_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodSummaryRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period summary request");

    let request = parse_body(correlation_id, payload)?;
    let vat_rate = state.config().await.get_vat_rate();

    let start_time = Instant::now();
    let summary = summarize_period(&request.invoices, request.as_of, vat_rate)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        as_of = %summary.as_of,
        invoices = request.invoices.len(),
        year_to_date = %summary.year_to_date.total,
        duration_us = start_time.elapsed().as_micros(),
        "Period summary calculated"
    );
    Ok(json_ok(summary))
}
