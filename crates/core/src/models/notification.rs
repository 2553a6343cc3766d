use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to a thread's appointment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Created,
    Edited,
    Canceled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Created => "created",
            NotificationKind::Edited => "edited",
            NotificationKind::Canceled => "canceled",
        }
    }
}

/// Event handed to the notification sink after a successful schedule change.
/// Emission is the HTTP handler's job; the scheduling services never notify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub thread_id: Uuid,
    pub recipient_id: Uuid,
    pub body: String,
}
