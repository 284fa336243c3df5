//! Monthly and year-to-date invoice aggregation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Invoice, MonthlyTotals, PeriodSummary, PeriodTotals};

use super::invoice_totals::{calculate_invoice_totals, invalid_invoice};

/// Aggregates invoices into monthly buckets for `as_of`'s year.
///
/// Only invoices issued in that year on or before `as_of` are counted. The
/// result always has twelve months; months after `as_of` are zero.
///
/// # Errors
///
/// Propagates `InvalidInvoice` from any counted invoice, and returns it for
/// the invoice whose amounts overflow a monthly or year-to-date total.
pub fn summarize_period(
    invoices: &[Invoice],
    as_of: NaiveDate,
    vat_rate: Decimal,
) -> EngineResult<PeriodSummary> {
    let year = as_of.year();
    let mut months: Vec<MonthlyTotals> = (1..=12)
        .map(|month| MonthlyTotals {
            year,
            month,
            totals: PeriodTotals::default(),
        })
        .collect();

    let mut year_to_date = PeriodTotals::default();
    for invoice in invoices
        .iter()
        .filter(|i| i.issue_date.year() == year && i.issue_date <= as_of)
    {
        let totals = calculate_invoice_totals(invoice, vat_rate)?;
        let overflow = || invalid_invoice(invoice, "period totals are too large".to_string());

        let month = &mut months[invoice.issue_date.month0() as usize].totals;
        *month = month.checked_add(&totals).ok_or_else(overflow)?;
        year_to_date = year_to_date.checked_add(&totals).ok_or_else(overflow)?;
    }

    let current_month = months[as_of.month0() as usize].totals.clone();

    Ok(PeriodSummary {
        as_of,
        months,
        current_month,
        year_to_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::InvoiceLine;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(number: &str, issue_date: NaiveDate, amount: &str) -> Invoice {
        Invoice {
            invoice_number: number.to_string(),
            customer: "Sejin Metal".to_string(),
            issue_date,
            lines: vec![InvoiceLine {
                description: "Service".to_string(),
                part_number: None,
                quantity: Decimal::ONE,
                unit_price: dec(amount),
            }],
        }
    }

    #[test]
    fn test_monthly_and_ytd_totals() {
        let invoices = vec![
            invoice("A", date(2026, 1, 15), "100000"),
            invoice("B", date(2026, 3, 2), "200000"),
            invoice("C", date(2026, 3, 28), "50000"),
            invoice("D", date(2026, 4, 1), "999999"),
        ];

        let summary = summarize_period(&invoices, date(2026, 3, 31), dec("0.10")).unwrap();

        assert_eq!(summary.months.len(), 12);
        assert_eq!(summary.months[0].totals.supply_amount, dec("100000"));
        assert_eq!(summary.months[1].totals.invoice_count, 0);
        assert_eq!(summary.months[2].totals.invoice_count, 2);
        assert_eq!(summary.months[3].totals.invoice_count, 0);

        assert_eq!(summary.current_month.supply_amount, dec("250000"));
        assert_eq!(summary.current_month.vat, dec("25000"));
        assert_eq!(summary.year_to_date.invoice_count, 3);
        assert_eq!(summary.year_to_date.supply_amount, dec("350000"));
        assert_eq!(summary.year_to_date.total, dec("385000"));
    }

    #[test]
    fn test_other_years_excluded() {
        let invoices = vec![
            invoice("OLD", date(2025, 12, 31), "500000"),
            invoice("NEW", date(2026, 1, 2), "10000"),
        ];

        let summary = summarize_period(&invoices, date(2026, 1, 31), dec("0.10")).unwrap();

        assert_eq!(summary.year_to_date.invoice_count, 1);
        assert_eq!(summary.year_to_date.supply_amount, dec("10000"));
        assert!(summary.months.iter().all(|m| m.year == 2026));
    }

    #[test]
    fn test_invoice_on_as_of_day_is_included() {
        let invoices = vec![invoice("EDGE", date(2026, 6, 30), "1000")];
        let summary = summarize_period(&invoices, date(2026, 6, 30), dec("0.10")).unwrap();
        assert_eq!(summary.current_month.invoice_count, 1);
    }

    #[test]
    fn test_invalid_counted_invoice_propagates_error() {
        let mut bad = invoice("BAD", date(2026, 2, 1), "1000");
        bad.lines[0].quantity = dec("-1");

        assert!(summarize_period(&[bad], date(2026, 2, 28), dec("0.10")).is_err());
    }

    #[test]
    fn test_invalid_future_invoice_is_ignored() {
        let mut bad = invoice("LATER", date(2026, 9, 1), "1000");
        bad.lines[0].quantity = dec("-1");

        assert!(summarize_period(&[bad], date(2026, 2, 28), dec("0.10")).is_ok());
    }

    #[test]
    fn test_year_to_date_overflow_is_rejected() {
        // Each invoice fits on its own; the running total does not
        let half = (Decimal::MAX / dec("2")).trunc() + Decimal::ONE;
        let invoices = vec![
            invoice("JAN", date(2026, 1, 10), &half.to_string()),
            invoice("FEB", date(2026, 2, 10), &half.to_string()),
        ];

        match summarize_period(&invoices, date(2026, 2, 28), Decimal::ZERO) {
            Err(EngineError::InvalidInvoice { invoice_number, message }) => {
                assert_eq!(invoice_number, "FEB");
                assert!(message.contains("period totals"));
            }
            other => panic!("Expected InvalidInvoice, got {:?}", other),
        }
    }
}
