//! Test utilities for handler testing.
//!
//! This module provides fixtures and helpers for testing HTTP handlers
//! against mock upstream servers and an in-memory favorites store.

use eventgate_lib::{EventClient, FavoritesStore, GeocodeResolver, QueryBuilder};
use reqwest::Client;

use crate::state::AppState;

/// API key sent to the mock ticketing upstream.
pub const TEST_API_KEY: &str = "test-api-key";

/// Token sent to the mock geolocation provider.
pub const TEST_GEO_TOKEN: &str = "test-geo-token";

/// Build an `AppState` whose clients point at the given base URLs.
///
/// Each call gets its own empty in-memory favorites store.
///
/// # Panics
///
/// Panics if the in-memory database cannot be opened. This indicates a test
/// environment issue.
pub fn test_state(events_base_url: &str, geo_base_url: &str) -> AppState {
    let http = Client::new();
    let resolver = GeocodeResolver::new(http.clone(), geo_base_url, TEST_GEO_TOKEN);
    let favorites = FavoritesStore::open_in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory favorites store: {}", e));

    AppState::from_components(
        EventClient::new(http, events_base_url, TEST_API_KEY),
        QueryBuilder::new(TEST_API_KEY, resolver),
        favorites,
    )
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
