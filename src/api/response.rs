//! Response types for the Webtranet engine API.
//!
//! This module defines the response bodies, the error response structure
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::table_warnings;
use crate::config::{ExchangeRateTable, PriceTierTable};
use crate::error::EngineError;
use crate::models::{
    AuditWarning, Currency, PartCategory, PersistedTimeRecord, PriceBand, TimeLedgerSummary,
};

/// Response body for `POST /time-records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRecordsResponse {
    /// One persisted record per input record, in input order.
    pub records: Vec<PersistedTimeRecord>,
    /// Totals across the batch.
    pub summary: TimeLedgerSummary,
}

/// Response body for the band-table endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTableResponse {
    /// The table's category.
    pub category: PartCategory,
    /// The bands in evaluation order.
    pub bands: Vec<PriceBand>,
    /// Ordering problems in the table, if any.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
}

impl From<&PriceTierTable> for BandTableResponse {
    fn from(table: &PriceTierTable) -> Self {
        Self {
            category: table.category(),
            bands: table.bands().to_vec(),
            warnings: table_warnings(table),
        }
    }
}

/// Response body for the exchange-rate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRatesResponse {
    /// KRW per EUR.
    #[serde(rename = "EUR")]
    pub eur: Decimal,
    /// KRW per USD.
    #[serde(rename = "USD")]
    pub usd: Decimal,
    /// Always 1.
    #[serde(rename = "KRW")]
    pub krw: Decimal,
}

impl From<&ExchangeRateTable> for ExchangeRatesResponse {
    fn from(table: &ExchangeRateTable) -> Self {
        Self {
            eur: table.rate(Currency::Eur),
            usd: table.rate(Currency::Usd),
            krw: table.rate(Currency::Krw),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::bad_request(error)
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(ApiError::with_details(
            "INVALID_PATH",
            "Invalid path parameter",
            rejection.body_text(),
        ))
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            EngineError::BandIndexOutOfRange { .. } => {
                Self::bad_request(ApiError::new("BAND_INDEX_OUT_OF_RANGE", message))
            }
            EngineError::InvalidBand { .. } => {
                Self::bad_request(ApiError::new("INVALID_BAND", message))
            }
            EngineError::FixedExchangeRate { .. } => {
                Self::bad_request(ApiError::with_details(
                    "FIXED_EXCHANGE_RATE",
                    message,
                    "KRW is the billing currency and is always 1",
                ))
            }
            EngineError::InvalidExchangeRate { .. } => {
                Self::bad_request(ApiError::new("INVALID_EXCHANGE_RATE", message))
            }
            EngineError::InvalidInvoice { .. } => {
                Self::bad_request(ApiError::new("INVALID_INVOICE", message))
            }
        }
    }
}
