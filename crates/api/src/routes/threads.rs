use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/threads/:id/appointments",
            put(handlers::threads::replace_slots),
        )
        .route(
            "/api/threads/:id/appointments",
            get(handlers::threads::get_slots),
        )
        .route(
            "/api/threads/:id/appointments",
            delete(handlers::threads::clear_slots),
        )
}
