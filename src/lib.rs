//! Calculation engine for the LVD Korea Webtranet service portal.
//!
//! This crate computes worked and travel time for service-report work days,
//! prices spare parts through tiered markup bands with KRW conversion, and
//! totals invoices with VAT and monthly / year-to-date aggregation. The
//! calculators are pure functions over an explicit [`config::EngineConfig`];
//! the [`api`] module exposes them over JSON HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
