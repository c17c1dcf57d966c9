//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use eventgate_lib::{Favorite, SearchRequest};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query string for `GET /api/suggest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestQuery {
    /// Text to autocomplete.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl SuggestQuery {
    /// The keyword, if present and not blank.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Validate for SuggestQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.keyword().is_none() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'keyword' query parameter is required",
                request_id,
            )));
        }
        Ok(())
    }
}

/// Body of `POST /api/events/search`.
///
/// Field names follow the browser client (`ipAddress`, `autoDetect`).
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchRequest {
    #[serde(default)]
    pub keyword: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub auto_detect: bool,

    /// Search radius in miles; a number or a numeric string.
    #[serde(default, deserialize_with = "lenient_number")]
    pub distance: Option<f64>,

    #[serde(default)]
    pub latlong: Option<String>,
}

impl From<EventSearchRequest> for SearchRequest {
    fn from(value: EventSearchRequest) -> Self {
        Self {
            keyword: non_empty(&value.keyword),
            category: non_empty(&value.category),
            location: non_empty(&value.location),
            ip_address: non_empty(&value.ip_address),
            auto_detect: value.auto_detect,
            distance: value.distance,
            latlong: non_empty(&value.latlong),
        }
    }
}

/// Body of `POST /api/favorites`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteRequest {
    /// Upstream event identifier.
    #[serde(default)]
    pub id: String,

    /// Event display name.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl Validate for FavoriteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.id.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'id' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'name' field is required and cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}

impl From<FavoriteRequest> for Favorite {
    fn from(value: FavoriteRequest) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            time: value.time,
            category: value.category,
            venue: value.venue,
            image: value.image,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accept a JSON number, a numeric string, or null. Anything else is treated
/// as absent so the default radius applies.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
