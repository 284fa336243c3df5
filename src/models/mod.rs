//! Core data models for the Webtranet engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod invoice;
mod pricing;
mod time_record;

pub use audit::{AuditStep, AuditWarning};
pub use invoice::{Invoice, InvoiceLine, InvoiceTotals, MonthlyTotals, PeriodSummary, PeriodTotals};
pub use pricing::{BandUpdate, Currency, PartCategory, PriceBand, PriceQuote};
pub use time_record::{
    ClockDuration, PersistedTimeRecord, TimeLedgerEntry, TimeLedgerSummary, TimeRecord,
};
