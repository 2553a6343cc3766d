use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/validate",
            post(handlers::appointments::validate_range),
        )
        .route("/api/appointments", patch(handlers::appointments::update_slot))
        .route(
            "/api/appointments/summary/today",
            get(handlers::appointments::today_summary),
        )
        .route(
            "/api/appointments/range",
            get(handlers::appointments::slots_in_range),
        )
}
