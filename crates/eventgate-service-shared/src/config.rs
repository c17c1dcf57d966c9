//! Gateway configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: favorites database connection string (required)
//! - `DATABASE_PASSWORD`: substituted for a `<password>` placeholder in `DATABASE_URL`
//! - `TICKETMASTER_API_KEY`: upstream API key
//! - `IPINFO_TOKEN`: geolocation provider token
//! - `GOOGLE_MAPS_API_KEY`: mapping provider key (recognized, currently unused)
//! - `PORT`: HTTP port (default: 8080)
//! - `TICKETMASTER_BASE_URL`, `IPINFO_BASE_URL`: upstream endpoint overrides

use std::fmt;
use std::path::Path;

use eventgate_lib::geocode::DEFAULT_IPINFO_BASE_URL;
use eventgate_lib::upstream::DEFAULT_TICKETMASTER_BASE_URL;
use thiserror::Error;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

const PASSWORD_PLACEHOLDER: &str = "<password>";

/// Fatal startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DATABASE_URL` was not provided.
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    /// `PORT` was set to something other than a TCP port number.
    #[error("PORT must be a port number, got '{value}'")]
    InvalidPort { value: String },

    /// The `.env` file exists but could not be read.
    #[error("failed to load {path}: {message}")]
    Dotenv { path: String, message: String },
}

/// Settings for the gateway process.
#[derive(Clone)]
pub struct GatewayConfig {
    pub ticketmaster_api_key: String,
    pub ipinfo_token: String,
    /// Connection string with any password placeholder already substituted.
    pub database_url: String,
    pub google_maps_api_key: Option<String>,
    pub port: u16,
    pub ticketmaster_base_url: String,
    pub ipinfo_base_url: String,
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
        let database_url = match var("DATABASE_PASSWORD") {
            Some(password) => raw_url.replace(PASSWORD_PLACEHOLDER, &password),
            None => raw_url,
        };

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let ticketmaster_api_key = var("TICKETMASTER_API_KEY").unwrap_or_default();
        if ticketmaster_api_key.is_empty() {
            tracing::warn!("TICKETMASTER_API_KEY is not set; upstream calls will be rejected");
        }

        let ipinfo_token = var("IPINFO_TOKEN").unwrap_or_default();
        if ipinfo_token.is_empty() {
            tracing::warn!("IPINFO_TOKEN is not set; location auto-detection may be throttled");
        }

        let config = Self {
            ticketmaster_api_key,
            ipinfo_token,
            database_url,
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
            port,
            ticketmaster_base_url: var("TICKETMASTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TICKETMASTER_BASE_URL.to_string()),
            ipinfo_base_url: var("IPINFO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IPINFO_BASE_URL.to_string()),
        };

        tracing::info!(
            port = config.port,
            ticketmaster_base_url = %config.ticketmaster_base_url,
            ipinfo_base_url = %config.ipinfo_base_url,
            maps_key_present = config.google_maps_api_key.is_some(),
            "configuration loaded"
        );

        Ok(config)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("database_url", &"<redacted>")
            .field("port", &self.port)
            .field("ticketmaster_base_url", &self.ticketmaster_base_url)
            .field("ipinfo_base_url", &self.ipinfo_base_url)
            .field("maps_key_present", &self.google_maps_api_key.is_some())
            .finish_non_exhaustive()
    }
}

/// Load a `.env` file into the process environment if it exists.
///
/// Returns `true` when a file was loaded. Variables already set in the
/// environment take precedence over the file.
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }

    dotenvy::from_path(path).map_err(|e| ConfigError::Dotenv {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(true)
}
