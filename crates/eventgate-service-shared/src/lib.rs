//! Shared infrastructure for the Eventgate HTTP gateway.
//!
//! This crate provides the HTTP glue used by the service binary:
//!
//! - [`AppState`]: Upstream clients and the favorites store, shared by handlers
//! - [`GatewayConfig`]: Environment-driven configuration
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin. All business logic resides in `eventgate-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string or JSON body                          │
//! │  - Validate parameters                                      │
//! │  - Call eventgate-lib APIs                                  │
//! │  - Map errors to ProblemDetails                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module builds state against mock upstreams. Enable the
//! `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{load_dotenv, ConfigError, GatewayConfig, DEFAULT_PORT};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_events_returned, record_favorite_change,
    record_search, record_upstream_failure, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_EVENT_NOT_FOUND, PROBLEM_FAVORITE_EXISTS,
    PROBLEM_FAVORITE_NOT_FOUND, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_LOCATION_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{EventSearchRequest, FavoriteRequest, SuggestQuery, Validate};
pub use state::{AppState, AppStateError};
