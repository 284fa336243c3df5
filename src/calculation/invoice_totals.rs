//! Invoice line-item totals and VAT.
//!
//! All amounts are KRW and rounded to whole won: each line amount is
//! rounded on its own, the supply amount is the sum of the rounded lines,
//! and VAT is rounded once on the supply amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Invoice, InvoiceLine, InvoiceTotals};

use super::rounding::round_money;

/// Returns `quantity * unit_price` rounded to whole won, or `None` if the
/// product does not fit in a `Decimal`.
pub fn line_amount(line: &InvoiceLine) -> Option<Decimal> {
    line.quantity
        .checked_mul(line.unit_price)
        .map(|amount| round_money(amount, 0))
}

/// Computes supply amount, VAT and total for an invoice.
///
/// # Errors
///
/// Returns `InvalidInvoice` if any line has a negative quantity or unit
/// price, if `vat_rate` is negative, or if an amount is too large to
/// represent.
///
/// # Example
///
/// ```
/// use webtranet_engine::calculation::calculate_invoice_totals;
/// use webtranet_engine::models::{Invoice, InvoiceLine};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let invoice = Invoice {
///     invoice_number: "INV-001".to_string(),
///     customer: "Hanil Steel".to_string(),
///     issue_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
///     lines: vec![InvoiceLine {
///         description: "On-site repair".to_string(),
///         part_number: None,
///         quantity: Decimal::ONE,
///         unit_price: Decimal::new(350_000, 0),
///     }],
/// };
///
/// let totals = calculate_invoice_totals(&invoice, Decimal::new(10, 2))?;
/// assert_eq!(totals.vat, Decimal::new(35_000, 0));
/// assert_eq!(totals.total, Decimal::new(385_000, 0));
/// # Ok::<(), webtranet_engine::error::EngineError>(())
/// ```
pub fn calculate_invoice_totals(invoice: &Invoice, vat_rate: Decimal) -> EngineResult<InvoiceTotals> {
    validate_invoice(invoice, vat_rate)?;
    let overflow = |what: String| invalid_invoice(invoice, format!("{} is too large", what));

    let line_amounts = invoice
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line_amount(line).ok_or_else(|| overflow(format!("line {} amount", index + 1)))
        })
        .collect::<EngineResult<Vec<Decimal>>>()?;
    let supply_amount = line_amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| overflow("supply amount".to_string()))?;
    let vat = supply_amount
        .checked_mul(vat_rate)
        .map(|vat| round_money(vat, 0))
        .ok_or_else(|| overflow("VAT".to_string()))?;
    let total = supply_amount
        .checked_add(vat)
        .ok_or_else(|| overflow("total".to_string()))?;

    Ok(InvoiceTotals {
        line_amounts,
        supply_amount,
        vat,
        total,
    })
}

pub(crate) fn invalid_invoice(invoice: &Invoice, message: String) -> EngineError {
    EngineError::InvalidInvoice {
        invoice_number: invoice.invoice_number.clone(),
        message,
    }
}

fn validate_invoice(invoice: &Invoice, vat_rate: Decimal) -> EngineResult<()> {
    let invalid = |message: String| invalid_invoice(invoice, message);

    if vat_rate < Decimal::ZERO {
        return Err(invalid(format!("VAT rate must not be negative, got {}", vat_rate)));
    }

    for (index, line) in invoice.lines.iter().enumerate() {
        if line.quantity < Decimal::ZERO {
            return Err(invalid(format!(
                "line {} has a negative quantity ({})",
                index + 1,
                line.quantity
            )));
        }
        if line.unit_price < Decimal::ZERO {
            return Err(invalid(format!(
                "line {} has a negative unit price ({})",
                index + 1,
                line.unit_price
            )));
        }
    }

    Ok(())
}
