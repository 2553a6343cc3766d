use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One booked appointment slot as the rest of the system sees it: a calendar
/// date (midnight UTC, date-only semantics) plus an `HH:mm` wall-clock range,
/// owned by an inquiry thread.
///
/// The resident/staff fields are snapshots taken when the slot was written;
/// later profile edits do not flow back into historical slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSlot {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub resident_id: Option<Uuid>,
    pub resident_name: Option<String>,
    pub resident_barangay_id: Option<String>,
    pub staff_id: Option<Uuid>,
    pub staff_name: Option<String>,
    pub staff_barangay_id: Option<String>,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

/// A date plus `HH:mm` range as submitted by clients. Used both for
/// scheduled-dates payload entries and for the old/new pair of a slot edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// Tagged outcome of every validation or update operation. The UI keys off
/// `ok` and shows `message` verbatim, so messages are part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCheck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl SlotCheck {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }
}

/// Display identity resolved through the user directory at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub display_name: String,
    pub barangay_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRangeRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub exempt_thread_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceSlotsRequest {
    pub staff_id: Uuid,
    pub resident_id: Uuid,
    #[serde(default)]
    pub scheduled_dates: Vec<SlotRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    pub thread_id: Uuid,
    pub staff_id: Uuid,
    pub resident_id: Uuid,
    pub old_range: SlotRange,
    pub new_range: SlotRange,
}

/// Client-facing projection of a slot, with the date flattened to
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub resident_name: Option<String>,
    pub staff_name: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceSlotsResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub inserted: Vec<SlotView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearSlotsResponse {
    pub ok: bool,
    pub removed: u64,
}

/// Dashboard rollup for the current office day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodaySummary {
    pub date: String,
    pub total_slots: usize,
    pub booked_minutes: i32,
    pub remaining_minutes: i32,
    pub open_blocks: i32,
    pub upcoming: Vec<SlotView>,
}
