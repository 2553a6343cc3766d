use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use bayan_core::{
    errors::PortalError,
    models::appointment::{ClearSlotsResponse, ReplaceSlotsRequest, ReplaceSlotsResponse, SlotView},
    models::notification::{NotificationEvent, NotificationKind},
    validation,
};
use uuid::Uuid;

use bayan_db::models::DbAppointmentSlot;

use crate::{middleware::error_handling::AppError, services, ApiState};

/// Replaces a thread's entire appointment schedule.
///
/// # Endpoint
///
/// ```text
/// PUT /api/threads/:id/appointments
/// ```
///
/// The payload is first validated against itself, then each entry against
/// the persisted schedule with this thread exempted (so a thread never
/// conflicts with the slots it is replacing). Only then is the wholesale
/// delete-and-insert performed. A rejected payload leaves the existing
/// schedule untouched.
#[axum::debug_handler]
pub async fn replace_slots(
    State(state): State<Arc<ApiState>>,
    Path(thread_id): Path<Uuid>,
    Json(payload): Json<ReplaceSlotsRequest>,
) -> Result<Json<ReplaceSlotsResponse>, AppError> {
    // Batch-internal validation first: no store reads for a payload that
    // conflicts with itself.
    let batch_check = validation::validate_scheduled_dates(&payload.scheduled_dates);
    if !batch_check.ok {
        return Ok(Json(ReplaceSlotsResponse {
            ok: false,
            message: batch_check.message,
            inserted: Vec::new(),
        }));
    }

    for entry in &payload.scheduled_dates {
        let check = services::scheduling::validate_time_range(
            state.slots.as_ref(),
            &entry.start_time,
            &entry.end_time,
            &entry.date,
            Some(thread_id),
        )
        .await
        .map_err(PortalError::Database)?;

        if !check.ok {
            return Ok(Json(ReplaceSlotsResponse {
                ok: false,
                message: check.message,
                inserted: Vec::new(),
            }));
        }
    }

    let had_slots = !state
        .slots
        .slots_by_thread(thread_id)
        .await
        .map_err(PortalError::Database)?
        .is_empty();

    let inserted = services::scheduling::upsert_appointment_slots(
        state.slots.as_ref(),
        state.directory.as_ref(),
        thread_id,
        payload.staff_id,
        payload.resident_id,
        &payload.scheduled_dates,
    )
    .await
    .map_err(PortalError::Database)?;

    if !inserted.is_empty() {
        let kind = if had_slots {
            NotificationKind::Edited
        } else {
            NotificationKind::Created
        };
        super::emit_notification(
            &state,
            NotificationEvent {
                kind,
                thread_id,
                recipient_id: payload.resident_id,
                body: format!("Your appointment schedule now has {} slot(s)", inserted.len()),
            },
        )
        .await;
    }

    Ok(Json(ReplaceSlotsResponse {
        ok: true,
        message: None,
        inserted: inserted.iter().map(DbAppointmentSlot::to_view).collect(),
    }))
}

/// Lists a thread's booked slots.
///
/// # Endpoint
///
/// ```text
/// GET /api/threads/:id/appointments
/// ```
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<Vec<SlotView>>, AppError> {
    let found = state
        .slots
        .slots_by_thread(thread_id)
        .await
        .map_err(PortalError::Database)?;

    Ok(Json(found.iter().map(DbAppointmentSlot::to_view).collect()))
}

/// Clears a thread's schedule and notifies the resident when anything was
/// actually removed.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/threads/:id/appointments?resident_id=...
/// ```
#[axum::debug_handler]
pub async fn clear_slots(
    State(state): State<Arc<ApiState>>,
    Path(thread_id): Path<Uuid>,
    axum::extract::Query(query): axum::extract::Query<ClearSlotsQuery>,
) -> Result<Json<ClearSlotsResponse>, AppError> {
    let removed = state
        .slots
        .delete_by_thread(thread_id)
        .await
        .map_err(PortalError::Database)?;

    if removed > 0 {
        if let Some(resident_id) = query.resident_id {
            super::emit_notification(
                &state,
                NotificationEvent {
                    kind: NotificationKind::Canceled,
                    thread_id,
                    recipient_id: resident_id,
                    body: "Your scheduled appointment was canceled".to_string(),
                },
            )
            .await;
        }
    }

    Ok(Json(ClearSlotsResponse { ok: true, removed }))
}

#[derive(Debug, serde::Deserialize)]
pub struct ClearSlotsQuery {
    pub resident_id: Option<Uuid>,
}
