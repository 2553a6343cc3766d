use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use bayan_core::{
    errors::PortalError,
    models::appointment::{SlotCheck, SlotView, TodaySummary, UpdateSlotRequest, ValidateRangeRequest},
    models::notification::{NotificationEvent, NotificationKind},
    time::normalize_date,
};

use crate::{middleware::error_handling::AppError, services, ApiState};

/// Checks a candidate range against office hours and the persisted schedule
/// for its date.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/validate
/// ```
///
/// Business rejections are data, not HTTP errors: the response is always
/// `200 { ok, message? }` unless the store itself fails.
#[axum::debug_handler]
pub async fn validate_range(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ValidateRangeRequest>,
) -> Result<Json<SlotCheck>, AppError> {
    let check = services::scheduling::validate_time_range(
        state.slots.as_ref(),
        &payload.start_time,
        &payload.end_time,
        &payload.date,
        payload.exempt_thread_id,
    )
    .await
    .map_err(PortalError::Database)?;

    Ok(Json(check))
}

/// Moves one booked slot to a new range via the transactional update
/// protocol, then notifies the resident on success.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/appointments
/// ```
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateSlotRequest>,
) -> Json<SlotCheck> {
    let check = services::scheduling::update_appointment_slot_with_validation(
        state.slots.as_ref(),
        state.directory.as_ref(),
        payload.thread_id,
        &payload.old_range,
        &payload.new_range,
        payload.staff_id,
        payload.resident_id,
    )
    .await;

    if check.ok {
        super::emit_notification(
            &state,
            NotificationEvent {
                kind: NotificationKind::Edited,
                thread_id: payload.thread_id,
                recipient_id: payload.resident_id,
                body: format!(
                    "Your appointment was moved to {} {}-{}",
                    payload.new_range.date, payload.new_range.start_time, payload.new_range.end_time,
                ),
            },
        )
        .await;
    }

    Json(check)
}

/// Today's utilization rollup for the staff dashboard.
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments/summary/today
/// ```
#[axum::debug_handler]
pub async fn today_summary(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<TodaySummary>, AppError> {
    let summary = services::scheduling::today_summary(state.slots.as_ref(), Utc::now())
        .await
        .map_err(PortalError::Database)?;

    Ok(Json(summary))
}

/// Query parameters for the date-range report.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Slots within an inclusive date range. A malformed bound on either side
/// rejects the whole request.
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments/range?start_date=2025-12-01&end_date=2025-12-07
/// ```
#[axum::debug_handler]
pub async fn slots_in_range(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<SlotView>>, AppError> {
    let (Some(start_date), Some(end_date)) = (
        normalize_date(&query.start_date),
        normalize_date(&query.end_date),
    ) else {
        return Err(AppError(PortalError::Validation(
            "Invalid date format".to_string(),
        )));
    };

    let found = services::scheduling::slots_in_range(state.slots.as_ref(), start_date, end_date)
        .await
        .map_err(PortalError::Database)?;

    Ok(Json(found))
}
