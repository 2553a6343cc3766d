use bayan_core::models::appointment::{
    AppointmentSlot, ReplaceSlotsRequest, SlotCheck, SlotRange, SlotView, UserIdentity,
};
use bayan_core::models::notification::{NotificationEvent, NotificationKind};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{from_str, json, to_string, to_value};
use uuid::Uuid;

#[test]
fn test_appointment_slot_serialization() {
    let slot = AppointmentSlot {
        id: Uuid::new_v4(),
        thread_id: Uuid::new_v4(),
        resident_id: Some(Uuid::new_v4()),
        resident_name: Some("Maria Santos".to_string()),
        resident_barangay_id: Some("BRGY-2024-0153".to_string()),
        staff_id: Some(Uuid::new_v4()),
        staff_name: Some("Jose Ramos".to_string()),
        staff_barangay_id: Some("BRGY-STAFF-0007".to_string()),
        date: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
        start_time: "09:00".to_string(),
        end_time: "09:30".to_string(),
        created_at: Utc::now(),
    };

    let encoded = to_string(&slot).expect("Failed to serialize appointment slot");
    let decoded: AppointmentSlot = from_str(&encoded).expect("Failed to deserialize appointment slot");

    assert_eq!(decoded.id, slot.id);
    assert_eq!(decoded.thread_id, slot.thread_id);
    assert_eq!(decoded.resident_name, slot.resident_name);
    assert_eq!(decoded.date, slot.date);
    assert_eq!(decoded.start_time, slot.start_time);
    assert_eq!(decoded.end_time, slot.end_time);
}

#[test]
fn test_slot_check_omits_absent_message() {
    let value = to_value(SlotCheck::ok()).expect("Failed to serialize slot check");
    assert_eq!(value, json!({ "ok": true }));

    let rejected = to_value(SlotCheck::rejected("Selected time is outside office hours"))
        .expect("Failed to serialize slot check");
    assert_eq!(
        rejected,
        json!({ "ok": false, "message": "Selected time is outside office hours" })
    );
}

#[test]
fn test_slot_check_round_trip() {
    let check = SlotCheck::rejected("Invalid date format");
    let decoded: SlotCheck =
        from_str(&to_string(&check).unwrap()).expect("Failed to deserialize slot check");
    assert_eq!(decoded, check);
}

#[test]
fn test_slot_range_fields_default_when_missing() {
    let decoded: SlotRange = from_str(r#"{"date":"2025-12-01"}"#).expect("should tolerate missing times");
    assert_eq!(decoded.date, "2025-12-01");
    assert_eq!(decoded.start_time, "");
    assert_eq!(decoded.end_time, "");
}

#[test]
fn test_replace_slots_request_defaults_to_empty_list() {
    let staff_id = Uuid::new_v4();
    let resident_id = Uuid::new_v4();
    let raw = format!(r#"{{"staff_id":"{staff_id}","resident_id":"{resident_id}"}}"#);
    let decoded: ReplaceSlotsRequest = from_str(&raw).expect("Failed to deserialize request");
    assert!(decoded.scheduled_dates.is_empty());
}

#[test]
fn test_notification_kind_wire_names() {
    assert_eq!(to_value(NotificationKind::Created).unwrap(), json!("created"));
    assert_eq!(to_value(NotificationKind::Edited).unwrap(), json!("edited"));
    assert_eq!(to_value(NotificationKind::Canceled).unwrap(), json!("canceled"));
    assert_eq!(NotificationKind::Edited.as_str(), "edited");
}

#[test]
fn test_notification_event_round_trip() {
    let event = NotificationEvent {
        kind: NotificationKind::Created,
        thread_id: Uuid::new_v4(),
        recipient_id: Uuid::new_v4(),
        body: "Your appointment was scheduled for 2025-12-01 09:00-09:30".to_string(),
    };
    let decoded: NotificationEvent =
        from_str(&to_string(&event).unwrap()).expect("Failed to deserialize notification event");
    assert_eq!(decoded, event);
}

#[test]
fn test_user_identity_round_trip() {
    let identity = UserIdentity {
        display_name: "Maria Santos".to_string(),
        barangay_id: "BRGY-2024-0153".to_string(),
    };
    let decoded: UserIdentity =
        from_str(&to_string(&identity).unwrap()).expect("Failed to deserialize identity");
    assert_eq!(decoded, identity);
}

#[test]
fn test_slot_view_round_trip() {
    let view = SlotView {
        id: Uuid::new_v4(),
        thread_id: Uuid::new_v4(),
        resident_name: Some("Maria Santos".to_string()),
        staff_name: None,
        date: "2025-12-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "09:30".to_string(),
    };
    let decoded: SlotView =
        from_str(&to_string(&view).unwrap()).expect("Failed to deserialize slot view");
    assert_eq!(decoded, view);
}
