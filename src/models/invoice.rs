//! Invoice (거래명세서) models.
//!
//! Amounts are in KRW. Line amounts, VAT and totals are derived by
//! [`crate::calculation::calculate_invoice_totals`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PriceQuote;

/// One line item on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Free-text description of the item or service.
    pub description: String,
    /// Spare-part number, when the line is a part.
    #[serde(default)]
    pub part_number: Option<String>,
    /// Quantity supplied.
    pub quantity: Decimal,
    /// Unit price in KRW.
    pub unit_price: Decimal,
}

impl InvoiceLine {
    /// Seeds a line from a part price quote, using the KRW billing price as
    /// the unit price.
    ///
    /// # Example
    ///
    /// ```
    /// use webtranet_engine::calculation::calculate_price;
    /// use webtranet_engine::config::EngineConfig;
    /// use webtranet_engine::models::{Currency, InvoiceLine, PartCategory};
    /// use rust_decimal::Decimal;
    ///
    /// let config = EngineConfig::builtin();
    /// let quote = calculate_price(Decimal::new(500, 0), PartCategory::Repair, Currency::Eur, &config);
    /// let line = InvoiceLine::from_quote(&quote, Decimal::new(2, 0), "Nozzle holder");
    /// assert_eq!(line.unit_price, Decimal::new(1_260_000, 0));
    /// ```
    pub fn from_quote(
        quote: &PriceQuote,
        quantity: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            part_number: None,
            quantity,
            unit_price: quote.billed_price_krw,
        }
    }
}

/// An invoice issued to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, unique per issuer.
    pub invoice_number: String,
    /// Customer (company) name.
    pub customer: String,
    /// Date of issue; drives monthly and year-to-date grouping.
    pub issue_date: NaiveDate,
    /// Line items in display order.
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

/// Derived totals for one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Amount per line, in line order.
    pub line_amounts: Vec<Decimal>,
    /// Sum of line amounts before VAT (공급가액).
    pub supply_amount: Decimal,
    /// Value added tax (세액).
    pub vat: Decimal,
    /// `supply_amount + vat` (합계금액).
    pub total: Decimal,
}

/// Aggregated amounts over a set of invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Number of invoices included.
    pub invoice_count: usize,
    /// Summed supply amounts.
    pub supply_amount: Decimal,
    /// Summed VAT.
    pub vat: Decimal,
    /// Summed totals.
    pub total: Decimal,
}

impl PeriodTotals {
    /// Returns the aggregate with one more invoice folded in, or `None` if
    /// an amount would overflow.
    pub fn checked_add(&self, totals: &InvoiceTotals) -> Option<PeriodTotals> {
        Some(PeriodTotals {
            invoice_count: self.invoice_count + 1,
            supply_amount: self.supply_amount.checked_add(totals.supply_amount)?,
            vat: self.vat.checked_add(totals.vat)?,
            total: self.total.checked_add(totals.total)?,
        })
    }
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// Amounts for the month.
    #[serde(flatten)]
    pub totals: PeriodTotals,
}

/// Monthly and year-to-date view of invoices as of a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The reference day; invoices issued after it are ignored.
    pub as_of: NaiveDate,
    /// January through December of `as_of`'s year.
    pub months: Vec<MonthlyTotals>,
    /// Totals for `as_of`'s month.
    pub current_month: PeriodTotals,
    /// Totals from 1 January through `as_of`.
    pub year_to_date: PeriodTotals,
}
