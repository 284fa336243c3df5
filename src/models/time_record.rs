//! Time record models for service-report work days.
//!
//! A [`TimeRecord`] carries the raw clock strings typed into a service report
//! row. The computed [`TimeLedgerEntry`] adds the worked and travel durations,
//! and [`PersistedTimeRecord`] is the flat shape handed to the backend on submit.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{compute_time_record, format_minutes, to_canonical_form};

use super::AuditStep;

/// A non-negative span of minutes, displayed as `HH:MM`.
///
/// Hours are zero-padded to two digits and may exceed 24; there is no
/// day wraparound.
///
/// # Examples
///
/// ```
/// use webtranet_engine::models::ClockDuration;
///
/// assert_eq!(ClockDuration::from_minutes(480).to_string(), "08:00");
/// assert_eq!(ClockDuration::from_minutes(-30), ClockDuration::ZERO);
/// assert_eq!(ClockDuration::from_minutes(1530).to_string(), "25:30");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockDuration {
    minutes: u64,
}

impl ClockDuration {
    /// A zero-length duration (`"00:00"`).
    pub const ZERO: ClockDuration = ClockDuration { minutes: 0 };

    /// Builds a duration from a signed minute count, flooring at zero.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes: u64::try_from(minutes).unwrap_or(0),
        }
    }

    /// Returns the duration in minutes.
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Returns true if the duration is `"00:00"`.
    pub fn is_zero(&self) -> bool {
        self.minutes == 0
    }
}

impl fmt::Display for ClockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_minutes(self.minutes))
    }
}

impl TryFrom<String> for ClockDuration {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (hours, minutes) = value
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM duration, got '{}'", value))?;
        let hours: u64 = hours
            .parse()
            .map_err(|_| format!("invalid hours in duration '{}'", value))?;
        let minutes: u64 = minutes
            .parse()
            .map_err(|_| format!("invalid minutes in duration '{}'", value))?;
        if minutes >= 60 {
            return Err(format!("minutes out of range in duration '{}'", value));
        }
        hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .map(|minutes| Self { minutes })
            .ok_or_else(|| format!("duration '{}' is too large", value))
    }
}

impl From<ClockDuration> for String {
    fn from(value: ClockDuration) -> Self {
        value.to_string()
    }
}

impl Add for ClockDuration {
    type Output = ClockDuration;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            minutes: self.minutes.saturating_add(rhs.minutes),
        }
    }
}

impl Sum for ClockDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ClockDuration::ZERO, Add::add)
    }
}

/// The raw time fields of one work day in a service report.
///
/// Each field holds the string exactly as entered, in either `HHMM` or
/// `HH:MM` form. Absent fields are treated as midnight (0 minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// The work day.
    pub date: NaiveDate,
    /// When the engineer left for the site.
    #[serde(default)]
    pub departure_time: Option<String>,
    /// When on-site work started.
    #[serde(default)]
    pub work_start_time: Option<String>,
    /// When on-site work ended.
    #[serde(default)]
    pub work_end_time: Option<String>,
    /// When the return trip ended.
    #[serde(default)]
    pub travel_end_time: Option<String>,
    /// Meal time taken during work, as a clock string (e.g. `"0100"`).
    #[serde(default)]
    pub work_meal_time: Option<String>,
    /// Meal time taken while travelling, as a clock string.
    #[serde(default)]
    pub travel_meal_time: Option<String>,
}

impl TimeRecord {
    /// Creates an empty record for the given day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            departure_time: None,
            work_start_time: None,
            work_end_time: None,
            travel_end_time: None,
            work_meal_time: None,
            travel_meal_time: None,
        }
    }

    /// Computes worked and travel time for this day.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use webtranet_engine::models::TimeRecord;
    ///
    /// let mut record = TimeRecord::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// record.work_start_time = Some("0900".to_string());
    /// record.work_end_time = Some("1800".to_string());
    /// record.work_meal_time = Some("0100".to_string());
    ///
    /// assert_eq!(record.compute().worked.to_string(), "08:00");
    /// ```
    pub fn compute(&self) -> TimeLedgerEntry {
        compute_time_record(self)
    }
}

/// A time record together with its computed durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLedgerEntry {
    /// The raw record the durations were computed from.
    pub record: TimeRecord,
    /// Net worked time, meal deducted.
    pub worked: ClockDuration,
    /// Net travel time, meal deducted.
    pub travel: ClockDuration,
    /// How the two durations were derived.
    pub audit_steps: Vec<AuditStep>,
}

impl TimeLedgerEntry {
    /// Builds the object submitted to the backend, with every raw field in
    /// canonical `HH:MM` form.
    pub fn to_persisted(&self) -> PersistedTimeRecord {
        let canonical = |value: &Option<String>| value.as_deref().map(to_canonical_form);
        PersistedTimeRecord {
            date: self.record.date,
            departure_time: canonical(&self.record.departure_time),
            work_start_time: canonical(&self.record.work_start_time),
            work_end_time: canonical(&self.record.work_end_time),
            travel_end_time: canonical(&self.record.travel_end_time),
            work_meal_time: canonical(&self.record.work_meal_time),
            travel_meal_time: canonical(&self.record.travel_meal_time),
            worked_time: self.worked,
            travel_time: self.travel,
        }
    }
}

/// The flat per-day object submitted to the backend.
///
/// All six raw fields are in canonical `HH:MM` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTimeRecord {
    /// The work day (record key).
    pub date: NaiveDate,
    /// Departure time.
    pub departure_time: Option<String>,
    /// Work start time.
    pub work_start_time: Option<String>,
    /// Work end time.
    pub work_end_time: Option<String>,
    /// Travel end time.
    pub travel_end_time: Option<String>,
    /// Work meal time.
    pub work_meal_time: Option<String>,
    /// Travel meal time.
    pub travel_meal_time: Option<String>,
    /// Computed worked time.
    pub worked_time: ClockDuration,
    /// Computed travel time.
    pub travel_time: ClockDuration,
}

/// Totals across a batch of time records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLedgerSummary {
    /// Number of records summarised.
    pub days: usize,
    /// Earliest record date, if any.
    pub first_date: Option<NaiveDate>,
    /// Latest record date, if any.
    pub last_date: Option<NaiveDate>,
    /// Sum of worked durations.
    pub total_worked: ClockDuration,
    /// Sum of travel durations.
    pub total_travel: ClockDuration,
}
