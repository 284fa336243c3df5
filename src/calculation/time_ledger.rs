//! Worked and travel time for service-report days.
//!
//! Worked time is the on-site span minus the work meal. Travel time is the
//! outbound leg (departure to work start) plus the return leg (work end to
//! travel end) minus the travel meal. Both are floored at zero; no overnight
//! spans are modelled.

use crate::models::{AuditStep, ClockDuration, TimeLedgerEntry, TimeLedgerSummary, TimeRecord};

use super::time_of_day::parse_time_of_day;

/// Computes net worked time.
///
/// Returns `"00:00"` if work starts at or after it ends, or if the meal
/// consumes the whole span.
///
/// # Examples
///
/// ```
/// use webtranet_engine::calculation::compute_worked_minutes;
///
/// assert_eq!(compute_worked_minutes("0900", "1800", "0100").to_string(), "08:00");
/// assert_eq!(compute_worked_minutes("1800", "0900", "0000").to_string(), "00:00");
/// ```
pub fn compute_worked_minutes(work_start: &str, work_end: &str, work_meal: &str) -> ClockDuration {
    let start = parse_time_of_day(work_start);
    let end = parse_time_of_day(work_end);
    if start >= end {
        return ClockDuration::ZERO;
    }

    ClockDuration::from_minutes(end.saturating_sub(start).saturating_sub(parse_time_of_day(work_meal)))
}

/// Computes net travel time.
///
/// Only the final total is floored at zero: a negative outbound leg is
/// silently offset by a longer return leg, and vice versa.
///
/// # Examples
///
/// ```
/// use webtranet_engine::calculation::compute_travel_minutes;
///
/// let travel = compute_travel_minutes("0800", "0900", "1800", "1900", "0000");
/// assert_eq!(travel.to_string(), "02:00");
/// ```
pub fn compute_travel_minutes(
    departure: &str,
    work_start: &str,
    work_end: &str,
    travel_end: &str,
    travel_meal: &str,
) -> ClockDuration {
    let (outbound, inbound) = travel_legs(departure, work_start, work_end, travel_end);

    ClockDuration::from_minutes(
        outbound
            .saturating_add(inbound)
            .saturating_sub(parse_time_of_day(travel_meal)),
    )
}

/// Computes both durations for a record, with an audit step for each.
///
/// Absent fields are treated as empty strings, i.e. midnight.
pub fn compute_time_record(record: &TimeRecord) -> TimeLedgerEntry {
    let departure = field(&record.departure_time);
    let work_start = field(&record.work_start_time);
    let work_end = field(&record.work_end_time);
    let travel_end = field(&record.travel_end_time);
    let work_meal = field(&record.work_meal_time);
    let travel_meal = field(&record.travel_meal_time);

    let worked = compute_worked_minutes(work_start, work_end, work_meal);
    let travel = compute_travel_minutes(departure, work_start, work_end, travel_end, travel_meal);

    let worked_step = AuditStep {
        step_number: 1,
        rule_id: "worked_time".to_string(),
        rule_name: "Worked Time".to_string(),
        input: serde_json::json!({
            "work_start_time": work_start,
            "work_end_time": work_end,
            "work_meal_time": work_meal
        }),
        output: serde_json::json!({ "worked_time": worked.to_string() }),
        reasoning: worked_reasoning(work_start, work_end, work_meal, worked),
    };

    let (outbound, inbound) = travel_legs(departure, work_start, work_end, travel_end);
    let travel_step = AuditStep {
        step_number: 2,
        rule_id: "travel_time".to_string(),
        rule_name: "Travel Time".to_string(),
        input: serde_json::json!({
            "departure_time": departure,
            "work_start_time": work_start,
            "work_end_time": work_end,
            "travel_end_time": travel_end,
            "travel_meal_time": travel_meal
        }),
        output: serde_json::json!({ "travel_time": travel.to_string() }),
        reasoning: format!(
            "Outbound {} min + return {} min - meal {} min = {}",
            outbound,
            inbound,
            parse_time_of_day(travel_meal),
            travel
        ),
    };

    TimeLedgerEntry {
        record: record.clone(),
        worked,
        travel,
        audit_steps: vec![worked_step, travel_step],
    }
}

/// Totals the durations of a batch of computed records.
pub fn summarize_time_records(entries: &[TimeLedgerEntry]) -> TimeLedgerSummary {
    TimeLedgerSummary {
        days: entries.len(),
        first_date: entries.iter().map(|e| e.record.date).min(),
        last_date: entries.iter().map(|e| e.record.date).max(),
        total_worked: entries.iter().map(|e| e.worked).sum(),
        total_travel: entries.iter().map(|e| e.travel).sum(),
    }
}

/// Outbound and return legs in minutes; either may be negative.
fn travel_legs(departure: &str, work_start: &str, work_end: &str, travel_end: &str) -> (i64, i64) {
    (
        parse_time_of_day(work_start).saturating_sub(parse_time_of_day(departure)),
        parse_time_of_day(travel_end).saturating_sub(parse_time_of_day(work_end)),
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn worked_reasoning(start: &str, end: &str, meal: &str, worked: ClockDuration) -> String {
    let start_min = parse_time_of_day(start);
    let end_min = parse_time_of_day(end);
    if start_min >= end_min {
        format!(
            "Work start {} min is not before work end {} min, no worked time",
            start_min, end_min
        )
    } else {
        format!(
            "Work end {} min - start {} min - meal {} min = {}",
            end_min,
            start_min,
            parse_time_of_day(meal),
            worked
        )
    }
}
