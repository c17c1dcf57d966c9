//! Handlers that read from the upstream ticketing API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use eventgate_lib::{Error as LibError, Event, SearchRequest};
use eventgate_service_shared::{
    extract_or_generate_request_id, from_lib_error, record_events_returned, record_search,
    record_upstream_failure, AppState, EventSearchRequest, ProblemDetails, SuggestQuery, Validate,
};

use super::json_problem;

type ApiResult<T> = Result<Json<T>, ProblemDetails>;

/// Map a library failure, counting it against the upstream when it came from there.
fn upstream_problem(error: &LibError, operation: &str, request_id: &str) -> ProblemDetails {
    if error.is_upstream() {
        record_upstream_failure(operation);
    }
    from_lib_error(error, request_id)
}

/// Handle `GET /api/suggest`.
pub async fn suggest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SuggestQuery>,
) -> ApiResult<Vec<Event>> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    query.validate(request_id).map_err(|problem| *problem)?;
    let keyword = query.keyword().unwrap_or_default();

    info!(request_id, keyword, "handling suggest request");

    let events = state
        .events()
        .suggest(keyword)
        .await
        .map_err(|e| upstream_problem(&e, "suggest", request_id))?;

    record_events_returned(events.len(), "suggest");
    Ok(Json(events))
}

/// Handle `POST /api/events/search`.
///
/// With `autoDetect` and an `ipAddress`, the caller's IP is geolocated and
/// sent upstream as a geohash. A lookup without coordinates is a 404.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<EventSearchRequest>, JsonRejection>,
) -> ApiResult<Vec<Event>> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let Json(body) = body.map_err(|e| json_problem(e, request_id))?;
    let request = SearchRequest::from(body);
    let mode = location_mode(&request);

    info!(
        request_id,
        keyword = request.keyword.as_deref().unwrap_or(""),
        category = request.category.as_deref().unwrap_or(""),
        location_mode = mode,
        "handling search request"
    );

    let params = match state.queries().build(&request).await {
        Ok(params) => params,
        Err(e) => {
            let outcome = match &e {
                LibError::LookupFailed { .. } => "location_not_found",
                _ => "error",
            };
            record_search(mode, outcome);
            return Err(upstream_problem(&e, "geolocate", request_id));
        }
    };

    let events = match state.events().search(&params).await {
        Ok(events) => events,
        Err(e) => {
            record_search(mode, "error");
            return Err(upstream_problem(&e, "search", request_id));
        }
    };

    record_search(mode, "ok");
    record_events_returned(events.len(), "search");
    info!(request_id, count = events.len(), "search completed");

    Ok(Json(events))
}

/// Handle `GET /api/events/{id}`.
pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Event> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    info!(request_id, event_id = %id, "handling event lookup");

    state
        .events()
        .get_by_id(&id)
        .await
        .map(Json)
        .map_err(|e| upstream_problem(&e, "event", request_id))
}

fn location_mode(request: &SearchRequest) -> &'static str {
    if request.auto_detect && request.ip_address.is_some() {
        "auto_detect"
    } else if request.location.is_some() {
        "manual"
    } else {
        "none"
    }
}
