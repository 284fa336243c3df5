//! Calculation logic for the Webtranet engine.
//!
//! This module contains the pure calculators: time-of-day parsing and the
//! worked/travel time ledger for service reports, tiered markup pricing for
//! spare parts with currency conversion, and invoice totals with VAT and
//! monthly / year-to-date aggregation.

mod invoice_totals;
mod period_summary;
mod price_tier;
mod rounding;
mod time_ledger;
mod time_of_day;

pub use invoice_totals::{calculate_invoice_totals, line_amount};
pub use period_summary::summarize_period;
pub use price_tier::{DEFAULT_FACTOR, calculate_price, find_factor, match_band, table_warnings};
pub use time_ledger::{
    compute_time_record, compute_travel_minutes, compute_worked_minutes, summarize_time_records,
};
pub use time_of_day::{format_minutes, parse_time_of_day, to_canonical_form, to_compact_form};
