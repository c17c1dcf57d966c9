//! Search request shaping for the upstream event search.
//!
//! [`base_params`] applies the pure rules (keyword, radius, category,
//! pass-through `latlong`). [`QueryBuilder::build`] adds the location step,
//! which may call the geolocation provider.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geocode::GeocodeResolver;

/// Radius in miles used when the request supplies none.
pub const DEFAULT_RADIUS: f64 = 10.0;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Fixed page size requested from upstream.
pub const PAGE_SIZE: u32 = 20;

const UNIT: &str = "miles";
const SORT: &str = "relevance,desc";

/// Caller-supplied search input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub keyword: Option<String>,
    pub category: Option<String>,
    /// Free-text place description. Accepted but not geocoded.
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub auto_detect: bool,
    /// Radius in miles.
    pub distance: Option<f64>,
    /// Raw coordinate string forwarded verbatim.
    pub latlong: Option<String>,
}

/// Query parameters sent to the upstream event search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventQueryParams {
    pub apikey: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latlong: Option<String>,
    pub radius: String,
    pub unit: &'static str,
    pub sort: &'static str,
    pub size: u32,
    #[serde(rename = "classificationName", skip_serializing_if = "Option::is_none")]
    pub classification_name: Option<String>,
    #[serde(rename = "geoPoint", skip_serializing_if = "Option::is_none")]
    pub geo_point: Option<String>,
}

/// Build the parameters that do not depend on geolocation.
///
/// Never fails: missing or unusable optional fields fall back to defaults.
pub fn base_params(request: &SearchRequest, api_key: &str) -> EventQueryParams {
    let radius = request
        .distance
        .filter(|d| d.is_finite() && *d != 0.0)
        .unwrap_or(DEFAULT_RADIUS);

    let classification_name = request
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
        .map(str::to_string);

    EventQueryParams {
        apikey: api_key.to_string(),
        keyword: request.keyword.clone().unwrap_or_default(),
        latlong: request.latlong.clone(),
        radius: format_radius(radius),
        unit: UNIT,
        sort: SORT,
        size: PAGE_SIZE,
        classification_name,
        geo_point: None,
    }
}

fn format_radius(radius: f64) -> String {
    if radius.fract() == 0.0 && radius.abs() < i64::MAX as f64 {
        format!("{}", radius as i64)
    } else {
        radius.to_string()
    }
}

/// Assembles upstream search parameters, resolving the caller's location
/// when auto-detection is requested.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    api_key: String,
    resolver: GeocodeResolver,
}

impl QueryBuilder {
    pub fn new(api_key: impl Into<String>, resolver: GeocodeResolver) -> Self {
        Self {
            api_key: api_key.into(),
            resolver,
        }
    }

    /// Build the full parameter set for `request`.
    ///
    /// # Errors
    ///
    /// With `auto_detect` set and an IP address present, a failed lookup
    /// ([`crate::Error::LookupFailed`] or a provider error) fails the whole
    /// build. The manual `location` branch is not consulted in that case.
    pub async fn build(&self, request: &SearchRequest) -> Result<EventQueryParams> {
        let mut params = base_params(request, &self.api_key);

        match (request.auto_detect, request.ip_address.as_deref()) {
            (true, Some(ip)) => {
                params.geo_point = Some(self.resolver.resolve(ip).await?);
            }
            _ => {
                if let Some(location) = request.location.as_deref() {
                    debug!(location, "manual location supplied; geocoding is disabled");
                }
            }
        }

        Ok(params)
    }
}
