//! Wall-clock time helpers.
//!
//! Booking times travel through the system as `HH:mm` strings and calendar
//! dates normalized to midnight UTC. Everything here is a total function:
//! malformed input yields `None` or is skipped, never a panic.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parses an `HH:mm` string into minutes since midnight.
///
/// Returns `None` for anything that does not split into two integer parts
/// around a colon. Components are not range-checked; the office-hour window
/// check downstream rejects out-of-range values anyway.
pub fn to_minutes(hhmm: &str) -> Option<i32> {
    let (hours, minutes) = hhmm.trim().split_once(':')?;
    let hours: i32 = hours.trim().parse().ok()?;
    let minutes: i32 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Half-open interval overlap under strict inequality.
///
/// Two ranges that merely touch (`a_end == b_start`) do not overlap.
pub fn ranges_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && a_end > b_start
}

/// True if the candidate range overlaps any entry in `existing`.
///
/// Entries with malformed times are skipped, treated as non-conflicting.
pub fn overlaps_any<'a, I>(start: i32, end: i32, existing: I) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    existing.into_iter().any(|(other_start, other_end)| {
        match (to_minutes(other_start), to_minutes(other_end)) {
            (Some(b_start), Some(b_end)) => ranges_overlap(start, end, b_start, b_end),
            _ => false,
        }
    })
}

/// Parses a calendar date to midnight UTC.
///
/// Accepts `YYYY-MM-DD`, with RFC 3339 as a fallback for clients that send a
/// full timestamp; the time-of-day is discarded either way.
pub fn normalize_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| start_of_day(stamp.with_timezone(&Utc)))
}

/// Truncates a timestamp to midnight UTC of the same calendar day.
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&at.date_naive().and_time(NaiveTime::MIN))
}

/// Formats a timestamp as `YYYY-MM-DD`.
pub fn format_ymd(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
