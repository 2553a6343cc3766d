//! # Bayan API
//!
//! The API crate provides the web server implementation for the bayan
//! appointment-scheduling service. It defines RESTful endpoints for
//! validating time ranges, replacing a thread's scheduled slots, editing a
//! single booking, and reading dashboard summaries.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Decode requests, call services, emit notifications
//! - **Services**: The scheduling core (validation, the transactional
//!   slot-update protocol, summary queries)
//! - **Middleware**: Cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence is reached through
//! the collaborator traits in `bayan-db`, so handlers and services never see
//! a concrete database type.

/// Configuration module for API settings
pub mod config;
/// Request handlers that decode payloads and emit notifications
pub mod handlers;
/// Middleware for logging and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// The scheduling core: validation, slot updates, summaries
pub mod services;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use bayan_db::repositories::appointment_slot::PgSlotStore;
use bayan_db::repositories::identity::PgDirectory;
use bayan_db::repositories::notification::PgNotifications;
use bayan_db::store::{Directory, NotificationSink, SlotStore};

/// Shared application state that is accessible to all request handlers.
///
/// Collaborators are held as trait objects so tests can swap in the
/// in-memory implementations from `bayan_db::mock`.
pub struct ApiState {
    /// The appointment slot collection
    pub slots: Arc<dyn SlotStore>,
    /// Resident/staff identity lookup
    pub directory: Arc<dyn Directory>,
    /// Notification sink written to after successful schedule changes
    pub notifications: Arc<dyn NotificationSink>,
}

impl ApiState {
    /// Production wiring: every collaborator backed by the same Postgres pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            slots: Arc::new(PgSlotStore::new(pool.clone())),
            directory: Arc::new(PgDirectory::new(pool.clone())),
            notifications: Arc::new(PgNotifications::new(pool)),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment validation, editing, and reporting endpoints
        .merge(routes::appointments::routes())
        // Per-thread schedule management endpoints
        .merge(routes::threads::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database
/// connection: sets up logging, configures routes, and serves.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState::with_pool(db_pool));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
