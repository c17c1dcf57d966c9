//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of stored favorites (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_stored: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            favorites_stored: None,
        }
    }

    /// Create a ready status with store information.
    pub fn ready(service: &str, version: &str, favorites: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            favorites_stored: Some(favorites),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            favorites_stored: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the process is serving. Touches neither the store nor
/// any upstream API.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"eventgate-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when the favorites store answers a count query, and
/// 503 otherwise. Upstream APIs are not probed.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match state.favorites(|store| store.count()).await {
        Ok(count) => {
            let status = HealthStatus::ready(service, version, count);
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, "favorites store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
