use bayan_core::models::appointment::SlotView;
use bayan_core::time::format_ymd;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted appointment slot row.
///
/// `date` is stored at midnight UTC (date-only semantics); `start_time` and
/// `end_time` are `HH:mm` wall-clock strings. The resident/staff columns are
/// denormalized snapshots captured at write time and never re-synced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentSlot {
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

impl DbAppointmentSlot {
    /// Client-facing projection with the date flattened to `YYYY-MM-DD`.
    pub fn to_view(&self) -> SlotView {
        SlotView {
            id: self.id,
            thread_id: self.thread_id,
            resident_name: self.resident_name.clone(),
            staff_name: self.staff_name.clone(),
            date: format_ymd(self.date),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub display_name: String,
    pub barangay_id: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
