//! Office-hour and payload validation.
//!
//! Checks here are pure: they look only at the values handed to them. The
//! store-backed overlap check against persisted slots lives in the api
//! crate's scheduling service.

use std::collections::HashMap;

use crate::models::appointment::{SlotCheck, SlotRange};
use crate::time::{format_ymd, normalize_date, ranges_overlap, to_minutes};

/// Bookable windows in minutes since midnight: mornings 08:00-12:00 and
/// afternoons 13:00-17:00. No window spans the lunch break.
pub const OFFICE_WINDOWS: [(i32, i32); 2] = [(8 * 60, 12 * 60), (13 * 60, 17 * 60)];

/// Total bookable minutes in one office day.
pub const OFFICE_MINUTES: i32 = (12 - 8) * 60 + (17 - 13) * 60;

/// Rejection messages surfaced directly to the UI. Callers match on these
/// strings, so they are part of the API contract.
pub mod messages {
    pub const START_BEFORE_END: &str = "Start time must be earlier than end time";
    pub const OUTSIDE_OFFICE_HOURS: &str = "Selected time is outside office hours";
    pub const OVERLAPS_EXISTING: &str = "Selected time overlaps an existing schedule";
    pub const INVALID_DATE: &str = "Invalid date format";
    pub const SLOT_NOT_FOUND: &str = "Original appointment slot not found";
    pub const RANGE_TAKEN: &str = "The selected time range is no longer available";
    pub const UPDATE_FAILED: &str = "Failed to update appointment slot";
}

/// True if the range lies wholly inside a single office window.
pub fn within_office_hours(start: i32, end: i32) -> bool {
    OFFICE_WINDOWS
        .iter()
        .any(|&(open, close)| start >= open && end <= close)
}

/// Shape check for a single range: parseable times, start strictly before
/// end, and wholly inside one office window.
///
/// Returns the parsed `(start, end)` minutes on success, the rejection
/// message otherwise. Unparsable times fail the ordering check, not a
/// separate error.
pub fn check_range(start_time: &str, end_time: &str) -> Result<(i32, i32), &'static str> {
    let (Some(start), Some(end)) = (to_minutes(start_time), to_minutes(end_time)) else {
        return Err(messages::START_BEFORE_END);
    };
    if start >= end {
        return Err(messages::START_BEFORE_END);
    }
    if !within_office_hours(start, end) {
        return Err(messages::OUTSIDE_OFFICE_HOURS);
    }
    Ok((start, end))
}

/// Validates a batch of scheduled dates against each other, before anything
/// is committed. Entries are bucketed by calendar date; each entry must pass
/// the ordering check and must not overlap any earlier entry in its bucket.
/// Fails fast on the first invalid or conflicting entry.
///
/// This does not consult the database; per-date conflicts with persisted
/// slots are the scheduling service's job.
pub fn validate_scheduled_dates(entries: &[SlotRange]) -> SlotCheck {
    let mut by_date: HashMap<String, Vec<(i32, i32)>> = HashMap::new();

    for entry in entries {
        let (Some(start), Some(end)) = (to_minutes(&entry.start_time), to_minutes(&entry.end_time))
        else {
            return SlotCheck::rejected(messages::START_BEFORE_END);
        };
        if start >= end {
            return SlotCheck::rejected(messages::START_BEFORE_END);
        }

        // Bucket by normalized date where possible; fall back to the raw
        // string so equal garbage still collides with itself.
        let key = normalize_date(&entry.date)
            .map(format_ymd)
            .unwrap_or_else(|| entry.date.trim().to_string());

        let bucket = by_date.entry(key).or_default();
        if bucket
            .iter()
            .any(|&(other_start, other_end)| ranges_overlap(start, end, other_start, other_end))
        {
            return SlotCheck::rejected(messages::OVERLAPS_EXISTING);
        }
        bucket.push((start, end));
    }

    SlotCheck::ok()
}
