//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use eventgate_lib::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for an IP address the geolocation provider cannot place.
pub const PROBLEM_LOCATION_NOT_FOUND: &str = "/problems/location-not-found";

/// Problem type URI for events unknown to the upstream API.
pub const PROBLEM_EVENT_NOT_FOUND: &str = "/problems/event-not-found";

/// Problem type URI for favorites that are not stored.
pub const PROBLEM_FAVORITE_NOT_FOUND: &str = "/problems/favorite-not-found";

/// Problem type URI for favorites whose id is already stored.
pub const PROBLEM_FAVORITE_EXISTS: &str = "/problems/favorite-exists";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., unusable store).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// Detail returned for every internal failure; specifics stay in the logs.
const INTERNAL_DETAIL: &str = "An internal error occurred";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all gateway endpoints.
///
/// # Example
///
/// ```
/// use eventgate_service_shared::{ProblemDetails, PROBLEM_EVENT_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_EVENT_NOT_FOUND,
///     "Event Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Event 'G5v0Z9Yc3A' not found")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for an IP address without a location.
    pub fn location_not_found(ip: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_LOCATION_NOT_FOUND,
            "Location Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No location found for IP address '{}'", ip))
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for an unknown event.
    pub fn event_not_found(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_EVENT_NOT_FOUND,
            "Event Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Event '{}' not found", id))
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for a favorite that is not stored.
    pub fn favorite_not_found(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_FAVORITE_NOT_FOUND,
            "Favorite Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Favorite '{}' not found", id))
        .with_request_id(request_id)
    }

    /// Create a 409 Conflict problem for a duplicate favorite.
    pub fn favorite_exists(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_FAVORITE_EXISTS,
            "Favorite Already Exists",
            StatusCode::CONFLICT,
        )
        .with_detail(format!("Favorite '{}' already exists", id))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Set the content-type header to application/problem+json
        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
/// Upstream, storage, and other internal failures are logged here with their
/// full cause and answered with a fixed message.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::MissingKeyword => {
            ProblemDetails::bad_request("The 'keyword' query parameter is required", request_id)
        }
        LibError::LookupFailed { ip } => ProblemDetails::location_not_found(ip, request_id),
        LibError::EventNotFound { id } => ProblemDetails::event_not_found(id, request_id),
        LibError::FavoriteNotFound { id } => ProblemDetails::favorite_not_found(id, request_id),
        LibError::FavoriteExists { id } => ProblemDetails::favorite_exists(id, request_id),
        _ => {
            if error.is_upstream() {
                tracing::error!(request_id, error = %error, "upstream request failed");
            } else {
                tracing::error!(request_id, error = %error, "internal error");
            }
            ProblemDetails::internal_error(INTERNAL_DETAIL, request_id)
        }
    }
}
