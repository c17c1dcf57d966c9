//! Event search and favorites HTTP gateway.
//!
//! # Endpoints
//!
//! - `GET /api/suggest?keyword=` - Autocomplete events by keyword
//! - `POST /api/events/search` - Search events, optionally near the caller's IP
//! - `GET /api/events/{id}` - Fetch a single event
//! - `GET /api/favorites` - List stored favorites
//! - `POST /api/favorites` - Store a favorite
//! - `DELETE /api/favorites/{id}` - Remove a favorite
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use eventgate_service_shared::{health_live, health_ready, metrics_handler, AppState, MetricsLayer};

mod routes;

/// Build the gateway router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/suggest", get(routes::events::suggest))
        .route("/api/events/search", post(routes::events::search))
        .route("/api/events/{id}", get(routes::events::get_event))
        .route(
            "/api/favorites",
            get(routes::favorites::list).post(routes::favorites::add),
        )
        .route("/api/favorites/{id}", delete(routes::favorites::remove))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}
