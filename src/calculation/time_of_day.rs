//! Time-of-day parsing and formatting.
//!
//! Service reports accept clock values in two shapes: compact `HHMM` (as
//! typed into the grid) and canonical `HH:MM` (as displayed and stored).
//! Parsing is lenient: anything that is neither shape counts
//! as midnight, and no range check is applied to hours or minutes.

/// Parses a clock string into minutes since midnight.
///
/// - `"HH:MM"` (anything containing a colon): `hours * 60 + minutes`, using
///   the first two colon-separated parts
/// - `"HHMM"` (exactly four characters): first two are hours, last two minutes
/// - anything else, including `""`: `0`
///
/// Each part is read as a leading integer (`"9 "` is 9, `"x9"` is 0).
/// Out-of-range values are not rejected: `"2575"` is 25 * 60 + 75.
/// Oversized digit runs saturate at the `i64` bounds.
///
/// # Examples
///
/// ```
/// use webtranet_engine::calculation::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("0930"), 570);
/// assert_eq!(parse_time_of_day("09:30"), 570);
/// assert_eq!(parse_time_of_day(""), 0);
/// assert_eq!(parse_time_of_day("930"), 0);
/// ```
pub fn parse_time_of_day(s: &str) -> i64 {
    if s.contains(':') {
        let mut parts = s.split(':');
        let hours = parts.next().map(leading_int).unwrap_or(0);
        let minutes = parts.next().map(leading_int).unwrap_or(0);
        return hours.saturating_mul(60).saturating_add(minutes);
    }

    let chars: Vec<char> = s.chars().collect();
    if chars.len() == 4 {
        let hours: String = chars[..2].iter().collect();
        let minutes: String = chars[2..].iter().collect();
        return leading_int(&hours)
            .saturating_mul(60)
            .saturating_add(leading_int(&minutes));
    }

    0
}

/// Formats a minute count as `HH:MM`.
///
/// Hours are not wrapped at 24.
///
/// ```
/// use webtranet_engine::calculation::format_minutes;
///
/// assert_eq!(format_minutes(480), "08:00");
/// assert_eq!(format_minutes(1505), "25:05");
/// ```
pub fn format_minutes(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Converts a compact `HHMM` value to canonical `HH:MM`.
///
/// Values that are already canonical, or are not four characters long, are
/// returned unchanged.
///
/// ```
/// use webtranet_engine::calculation::{to_canonical_form, to_compact_form};
///
/// assert_eq!(to_canonical_form("0930"), "09:30");
/// assert_eq!(to_compact_form(&to_canonical_form("0930")), "0930");
/// ```
pub fn to_canonical_form(s: &str) -> String {
    if s.contains(':') {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 4 {
        return s.to_string();
    }
    let hours: String = chars[..2].iter().collect();
    let minutes: String = chars[2..].iter().collect();
    format!("{}:{}", hours, minutes)
}

/// Converts a canonical `HH:MM` value to compact `HHMM` by dropping colons.
pub fn to_compact_form(s: &str) -> String {
    s.replace(':', "")
}

/// Reads an optional sign and the leading run of ASCII digits; 0 if there are none.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let value = rest
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));

    if negative { -value } else { value }
}
