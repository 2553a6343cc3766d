pub mod appointments;
pub mod threads;

use bayan_core::models::notification::NotificationEvent;
use tracing::warn;

use crate::ApiState;

/// Records a notification after a successful schedule change. Sink failures
/// are logged and never fail the request that triggered them.
pub(crate) async fn emit_notification(state: &ApiState, event: NotificationEvent) {
    if let Err(err) = state.notifications.notify(event).await {
        warn!(error = %err, "failed to record notification");
    }
}
