//! Eventgate library entry points.
//!
//! This crate exposes the pieces the gateway is built from: geohash encoding,
//! IP geolocation, search query shaping, the upstream ticketing client, and
//! the favorites store. Higher-level consumers (the HTTP service) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

mod endpoint;
pub mod error;
pub mod favorites;
pub mod geocode;
pub mod geohash;
pub mod query;
pub mod upstream;

pub use error::{Error, Result};
pub use favorites::{Favorite, FavoritesStore};
pub use geocode::{GeocodeResolver, GEOHASH_PRECISION};
pub use query::{base_params, EventQueryParams, QueryBuilder, SearchRequest, DEFAULT_RADIUS};
pub use upstream::{Event, EventClient};
