//! Prometheus metrics infrastructure for the gateway.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for search, upstream, and favorites traffic
//!
//! # Example
//!
//! ```no_run
//! use eventgate_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! // Initialize metrics at startup
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! // Add metrics endpoint to router
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Self { enabled }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// This must be called once at application startup before any metrics are recorded.
/// Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    #[error("metrics are disabled")]
    Disabled,
    /// The recorder has already been installed.
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record the outcome of an event search.
///
/// Increments `eventgate_searches_total`.
///
/// # Arguments
///
/// * `location_mode` - "auto_detect", "manual", or "none"
/// * `outcome` - "ok", "location_not_found", or "error"
pub fn record_search(location_mode: &str, outcome: &str) {
    metrics::counter!(
        "eventgate_searches_total",
        "location_mode" => location_mode.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a failed call to a third-party API.
///
/// Increments `eventgate_upstream_failures_total`.
///
/// # Arguments
///
/// * `operation` - "suggest", "search", "event", or "geolocate"
pub fn record_upstream_failure(operation: &str) {
    metrics::counter!(
        "eventgate_upstream_failures_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record how many events an upstream read returned.
///
/// Records to the `eventgate_events_returned` histogram.
pub fn record_events_returned(count: usize, operation: &str) {
    metrics::histogram!(
        "eventgate_events_returned",
        "operation" => operation.to_string()
    )
    .record(count as f64);
}

/// Record a favorites mutation attempt.
///
/// Increments `eventgate_favorites_changed_total`.
///
/// # Arguments
///
/// * `action` - "add" or "remove"
/// * `outcome` - "ok", "conflict", "not_found", or "error"
pub fn record_favorite_change(action: &str, outcome: &str) {
    metrics::counter!(
        "eventgate_favorites_changed_total",
        "action" => action.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let err = init_metrics(&MetricsConfig { enabled: false }).unwrap_err();
        assert!(matches!(err, MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        let output = metrics_handler().await;

        // Should return either proper metrics or "not initialized" message
        assert!(
            output.contains('#') || output.is_empty(),
            "Metrics output should be Prometheus format or indicate not initialized"
        );
    }

    #[test]
    fn test_business_metric_helpers() {
        // Without an installed recorder these are no-ops; they must not panic.
        record_search("auto_detect", "ok");
        record_search("none", "error");
        record_upstream_failure("suggest");
        record_events_returned(20, "search");
        record_favorite_change("add", "conflict");
        record_favorite_change("remove", "ok");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );

        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
