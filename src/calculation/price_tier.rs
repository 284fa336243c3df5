//! Tiered markup pricing for spare parts.
//!
//! A part's original cost is looked up in its category's band table to pick
//! a markup factor, the marked-up price is rounded to cents in the source
//! currency, and then converted to whole won.
//!
//! Band selection is first-match in table order. The engine never sorts a
//! table itself: keeping bands ascending by `min_price` is the caller's job
//! (see [`PriceTierTable::sort_by_min_price`]). Quotes computed over an
//! unsorted or overlapping table carry a warning so the settings screen can
//! flag it.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{EngineConfig, PriceTierTable};
use crate::models::{AuditStep, AuditWarning, Currency, PartCategory, PriceBand, PriceQuote};

use super::rounding::{clamped_product, round_money};

/// Factor used when no band matches a price.
pub const DEFAULT_FACTOR: Decimal = Decimal::ONE;

/// Returns the first band (and its index) that contains `price`.
pub fn match_band(price: Decimal, bands: &[PriceBand]) -> Option<(usize, &PriceBand)> {
    bands.iter().enumerate().find(|(_, band)| band.contains(price))
}

/// Returns the markup factor for `price`.
///
/// The factor of the first band containing the price wins; if none does,
/// the result is [`DEFAULT_FACTOR`] (1.0, no markup).
///
/// # Examples
///
/// ```
/// use webtranet_engine::calculation::find_factor;
/// use webtranet_engine::config::default_bands;
/// use webtranet_engine::models::PartCategory;
/// use rust_decimal::Decimal;
///
/// let repair = default_bands(PartCategory::Repair);
/// assert_eq!(find_factor(Decimal::new(150, 0), &repair), Decimal::new(210, 2));
/// assert_eq!(find_factor(Decimal::new(3500, 0), &repair), Decimal::new(120, 2));
/// assert_eq!(find_factor(Decimal::new(50, 0), &repair), Decimal::ONE);
/// ```
pub fn find_factor(price: Decimal, bands: &[PriceBand]) -> Decimal {
    match_band(price, bands)
        .map(|(_, band)| band.factor)
        .unwrap_or(DEFAULT_FACTOR)
}

/// Prices a part.
///
/// - `factor = find_factor(original_price, bands for category)`
/// - `billed_price = round2(original_price * factor)`
/// - `billed_price_krw = round0(billed_price * rate(currency))`
///
/// The result depends only on the arguments, so repeating a call with the
/// same configuration snapshot yields an identical quote.
///
/// # Example
///
/// ```
/// use webtranet_engine::calculation::calculate_price;
/// use webtranet_engine::config::EngineConfig;
/// use webtranet_engine::models::{Currency, PartCategory};
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let quote = calculate_price(Decimal::new(500, 0), PartCategory::Repair, Currency::Eur, &config);
///
/// assert_eq!(quote.factor, Decimal::new(180, 2));
/// assert_eq!(quote.billed_price, Decimal::new(90000, 2));
/// assert_eq!(quote.billed_price_krw, Decimal::new(1_260_000, 0));
/// ```
pub fn calculate_price(
    original_price: Decimal,
    category: PartCategory,
    currency: Currency,
    config: &EngineConfig,
) -> PriceQuote {
    let table = config.bands(category);
    let matched = match_band(original_price, table.bands());
    let factor = matched.map(|(_, band)| band.factor).unwrap_or(DEFAULT_FACTOR);
    let matched_band = matched.map(|(index, _)| index);

    let (marked_up, price_clamped) = clamped_product(original_price, factor);
    let billed_price = round_money(marked_up, 2);
    let rate = config.exchange_rates().rate(currency);
    let (converted, krw_clamped) = clamped_product(billed_price, rate);
    let billed_price_krw = round_money(converted, 0);

    let lookup_reasoning = match matched {
        Some((index, band)) => format!(
            "{} falls in {} band {} ({}), factor {}",
            original_price,
            category,
            index,
            describe_band(band),
            factor
        ),
        None => {
            debug!(
                %original_price,
                %category,
                bands = table.len(),
                "No price band matched, using default factor"
            );
            format!(
                "{} matches no {} band, default factor {} applied",
                original_price, category, DEFAULT_FACTOR
            )
        }
    };

    let lookup_step = AuditStep {
        step_number: 1,
        rule_id: "price_band_lookup".to_string(),
        rule_name: "Price Band Lookup".to_string(),
        input: serde_json::json!({
            "original_price": original_price.to_string(),
            "category": category.as_str(),
            "band_count": table.len()
        }),
        output: serde_json::json!({
            "matched_band": matched_band,
            "factor": factor.to_string(),
            "billed_price": billed_price.to_string()
        }),
        reasoning: lookup_reasoning,
    };

    let conversion_step = AuditStep {
        step_number: 2,
        rule_id: "currency_conversion".to_string(),
        rule_name: "Currency Conversion".to_string(),
        input: serde_json::json!({
            "billed_price": billed_price.to_string(),
            "currency": currency.code(),
            "rate": rate.to_string()
        }),
        output: serde_json::json!({
            "billed_price_krw": billed_price_krw.to_string()
        }),
        reasoning: format!(
            "{} {} at {} KRW/{} = {} KRW",
            billed_price, currency, rate, currency, billed_price_krw
        ),
    };

    let mut warnings = table_warnings(table);
    if price_clamped || krw_clamped {
        warnings.push(AuditWarning::new(
            "AMOUNT_CLAMPED",
            format!(
                "{} {} is too large to price exactly; the billed amount was clamped",
                original_price, currency
            ),
            "high",
        ));
    }

    PriceQuote {
        original_price,
        currency,
        category,
        factor,
        matched_band,
        billed_price,
        billed_price_krw,
        audit_steps: vec![lookup_step, conversion_step],
        warnings,
    }
}

/// Reports ordering problems that make first-match selection ambiguous.
pub fn table_warnings(table: &PriceTierTable) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if !table.is_sorted() {
        warnings.push(AuditWarning::new(
            "UNSORTED_BANDS",
            format!(
                "The {} band table is not ascending by min_price; the first matching band wins",
                table.category()
            ),
            "medium",
        ));
    }

    for (first, second) in table.overlapping_pairs() {
        warnings.push(AuditWarning::new(
            "OVERLAPPING_BANDS",
            format!(
                "{} bands {} and {} overlap; band {} takes precedence",
                table.category(),
                first,
                second,
                first
            ),
            "low",
        ));
    }

    warnings
}

fn describe_band(band: &PriceBand) -> String {
    match band.max_price {
        Some(max) => format!("{} to {}", band.min_price, max),
        None => format!("{} and above", band.min_price),
    }
}
