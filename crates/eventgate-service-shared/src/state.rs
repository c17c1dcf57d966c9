//! Application state for the gateway.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the upstream clients and the favorites store. Everything is built
//! once in `main` and injected through axum's `State` extractor.

use std::sync::Arc;

use eventgate_lib::{
    Error as LibError, EventClient, FavoritesStore, GeocodeResolver, QueryBuilder,
};
use reqwest::Client;

use crate::config::GatewayConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open the favorites database.
    StoreOpen(LibError),

    /// Failed to construct the outbound HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen(e) => write!(f, "failed to open favorites store: {}", e),
            Self::HttpClient(e) => write!(f, "failed to build HTTP client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen(e) => Some(e),
            Self::HttpClient(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::StoreOpen(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use eventgate_service_shared::{AppState, GatewayConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let favorites = state.favorites(|store| store.list()).await;
///     // ... use favorites
/// }
///
/// let state = AppState::from_config(&GatewayConfig::from_env()?)?;
/// let app = Router::new()
///     .route("/api/favorites", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    events: EventClient,
    queries: QueryBuilder,
    favorites: FavoritesStore,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// Opens the favorites database named by `database_url` and constructs one
    /// HTTP client shared by the ticketing and geolocation clients.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, AppStateError> {
        let http = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(AppStateError::HttpClient)?;

        tracing::info!("opening favorites store");
        let favorites = FavoritesStore::open(&config.database_url)?;
        tracing::info!(
            stored = favorites.count()?,
            "favorites store opened successfully"
        );

        let resolver = GeocodeResolver::new(
            http.clone(),
            config.ipinfo_base_url.clone(),
            config.ipinfo_token.clone(),
        );
        let events = EventClient::new(
            http,
            config.ticketmaster_base_url.clone(),
            config.ticketmaster_api_key.clone(),
        );
        let queries = QueryBuilder::new(config.ticketmaster_api_key.clone(), resolver);

        Ok(Self::from_components(events, queries, favorites))
    }

    /// Create application state from pre-built components.
    ///
    /// This is useful for testing against mock upstreams.
    pub fn from_components(
        events: EventClient,
        queries: QueryBuilder,
        favorites: FavoritesStore,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                events,
                queries,
                favorites,
            }),
        }
    }

    /// Access the upstream ticketing client.
    pub fn events(&self) -> &EventClient {
        &self.inner.events
    }

    /// Access the search query builder.
    pub fn queries(&self) -> &QueryBuilder {
        &self.inner.queries
    }

    /// Run a favorites store operation on the blocking thread pool.
    pub async fn favorites<T, F>(&self, op: F) -> eventgate_lib::Result<T>
    where
        F: FnOnce(&FavoritesStore) -> eventgate_lib::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.inner.favorites.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| LibError::StoreTask {
                message: e.to_string(),
            })?
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("favorites", &self.inner.favorites)
            .finish_non_exhaustive()
    }
}

fn user_agent() -> String {
    format!(
        "eventgate/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/eventgate/eventgate"
    )
}
