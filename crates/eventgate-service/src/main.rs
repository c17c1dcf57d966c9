//! Eventgate HTTP gateway binary.
//!
//! # Configuration
//!
//! - `DOTENV_PATH` - Environment file loaded before anything else (default: `.env`)
//! - `DATABASE_URL` - Favorites database (required; the process exits without it)
//! - `DATABASE_PASSWORD` - Replaces a `<password>` placeholder in `DATABASE_URL`
//! - `TICKETMASTER_API_KEY` - Upstream ticketing API key
//! - `IPINFO_TOKEN` - Geolocation provider token
//! - `PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Prometheus recorder on/off (default: true)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use eventgate_service_shared::{
    init_logging, init_metrics, load_dotenv, AppState, GatewayConfig, LoggingConfig,
    MetricsConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The env file has to be applied before logging reads RUST_LOG and LOG_FORMAT.
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv = load_dotenv(&dotenv_path);

    let logging_config = LoggingConfig::from_env().with_service("eventgate");
    init_logging(&logging_config);

    match dotenv {
        Ok(true) => info!(path = %dotenv_path, "loaded environment file"),
        Ok(false) => debug!(path = %dotenv_path, "no environment file found"),
        Err(e) => warn!(error = %e, "ignoring unreadable environment file"),
    }

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = GatewayConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to build application state");
        e
    })?;

    let app = eventgate_service::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
