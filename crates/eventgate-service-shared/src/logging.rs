//! Process-wide `tracing` subscriber setup.
//!
//! Read from the environment:
//!
//! - `LOG_FORMAT`: `json` (default) or `text`/`pretty`
//! - `RUST_LOG`: filter directives (default: `info`)
//! - `SERVICE_NAME`: name recorded on the first log line
//!
//! ```no_run
//! use eventgate_service_shared::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env().with_service("eventgate"));
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, carrying the request span fields.
    #[default]
    Json,
    /// Multi-line human-readable output for local runs.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") || value.eq_ignore_ascii_case("pretty") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directives from `RUST_LOG`; unparsable input falls back to `info`.
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: DEFAULT_LEVEL.to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            format: var("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            level: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            service: var("SERVICE_NAME"),
        }
    }

    /// Use `service` unless `SERVICE_NAME` already supplied one.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = self.service.take().or_else(|| Some(service.into()));
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(config.filter());

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
    }

    if let Some(service) = &config.service {
        tracing::info!(service = %service, format = ?config.format, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn format_parsing() {
        assert_eq!(LogFormat::parse("TEXT"), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = LoggingConfig::from_lookup(lookup(&[]));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(config.service.is_none());
    }

    #[test]
    fn environment_overrides() {
        let config = LoggingConfig::from_lookup(lookup(&[
            ("LOG_FORMAT", "text"),
            ("RUST_LOG", "eventgate_service=debug"),
            ("SERVICE_NAME", "gateway-eu"),
            ("UNRELATED", "x"),
        ]));
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "eventgate_service=debug");
        assert_eq!(config.service.as_deref(), Some("gateway-eu"));
    }

    #[test]
    fn with_service_keeps_configured_name() {
        let unnamed = LoggingConfig::default().with_service("eventgate");
        assert_eq!(unnamed.service.as_deref(), Some("eventgate"));

        let named = LoggingConfig::from_lookup(lookup(&[("SERVICE_NAME", "from-env")]));
        assert_eq!(
            named.with_service("eventgate").service.as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn bad_filter_falls_back_to_info() {
        let config = LoggingConfig {
            level: "eventgate=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(
            config.filter().max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::INFO)
        );
    }
}
