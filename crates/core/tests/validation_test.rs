use bayan_core::models::appointment::SlotRange;
use bayan_core::validation::{
    check_range, messages, validate_scheduled_dates, within_office_hours, OFFICE_MINUTES,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn range(date: &str, start: &str, end: &str) -> SlotRange {
    SlotRange {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

#[test]
fn test_office_minutes_total() {
    assert_eq!(OFFICE_MINUTES, 480);
}

#[rstest]
#[case(480, 720)] // full morning window
#[case(780, 1020)] // full afternoon window
#[case(540, 570)] // inside the morning
#[case(990, 1020)] // end of the afternoon
fn test_within_office_hours(#[case] start: i32, #[case] end: i32) {
    assert!(within_office_hours(start, end));
}

#[rstest]
#[case(450, 510)] // starts before opening
#[case(690, 810)] // crosses the lunch break
#[case(1000, 1050)] // runs past closing
#[case(0, 1440)] // whole day
fn test_outside_office_hours(#[case] start: i32, #[case] end: i32) {
    assert!(!within_office_hours(start, end));
}

#[test]
fn test_check_range_accepts_a_morning_slot() {
    assert_eq!(check_range("09:00", "09:30"), Ok((540, 570)));
}

#[rstest]
#[case("09:30", "09:30")]
#[case("10:00", "09:30")]
#[case("not a time", "09:30")]
#[case("09:00", "")]
fn test_check_range_ordering_failures(#[case] start: &str, #[case] end: &str) {
    assert_eq!(check_range(start, end), Err(messages::START_BEFORE_END));
}

#[rstest]
#[case("07:30", "08:30")] // before opening
#[case("11:30", "13:30")] // crosses lunch
#[case("16:30", "17:30")] // past closing
#[case("12:00", "13:00")] // entirely inside the lunch break
fn test_check_range_office_hour_failures(#[case] start: &str, #[case] end: &str) {
    assert_eq!(check_range(start, end), Err(messages::OUTSIDE_OFFICE_HOURS));
}

#[test]
fn test_payload_rejects_overlapping_entries_on_one_date() {
    let entries = vec![
        range("2025-12-01", "09:00", "09:30"),
        range("2025-12-01", "09:20", "09:50"),
    ];
    let check = validate_scheduled_dates(&entries);
    assert!(!check.ok);
    assert_eq!(check.message.as_deref(), Some(messages::OVERLAPS_EXISTING));
}

#[test]
fn test_payload_accepts_non_overlapping_entries_on_one_date() {
    let entries = vec![
        range("2025-12-01", "09:00", "09:30"),
        range("2025-12-01", "09:35", "10:00"),
    ];
    assert!(validate_scheduled_dates(&entries).ok);
}

#[test]
fn test_payload_touching_entries_do_not_conflict() {
    let entries = vec![
        range("2025-12-01", "09:00", "09:30"),
        range("2025-12-01", "09:30", "10:00"),
    ];
    assert!(validate_scheduled_dates(&entries).ok);
}

#[test]
fn test_payload_same_range_on_different_dates_is_fine() {
    let entries = vec![
        range("2025-12-01", "09:00", "09:30"),
        range("2025-12-02", "09:00", "09:30"),
    ];
    assert!(validate_scheduled_dates(&entries).ok);
}

#[test]
fn test_payload_fails_fast_on_first_bad_entry() {
    // The malformed first entry trips the ordering check before the later
    // conflicting pair is ever inspected.
    let entries = vec![
        range("2025-12-01", "09:30", "09:00"),
        range("2025-12-01", "10:00", "10:30"),
        range("2025-12-01", "10:15", "10:45"),
    ];
    let check = validate_scheduled_dates(&entries);
    assert_eq!(check.message.as_deref(), Some(messages::START_BEFORE_END));
}

#[test]
fn test_payload_equivalent_date_spellings_share_a_bucket() {
    let entries = vec![
        range("2025-12-01", "09:00", "09:30"),
        range("2025-12-01T00:00:00Z", "09:15", "09:45"),
    ];
    let check = validate_scheduled_dates(&entries);
    assert_eq!(check.message.as_deref(), Some(messages::OVERLAPS_EXISTING));
}

#[test]
fn test_empty_payload_is_valid() {
    assert!(validate_scheduled_dates(&[]).ok);
}
