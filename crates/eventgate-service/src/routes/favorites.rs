//! Favorites CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::info;

use eventgate_lib::{Error as LibError, Favorite};
use eventgate_service_shared::{
    extract_or_generate_request_id, from_lib_error, record_favorite_change, AppState,
    FavoriteRequest, ProblemDetails, Validate,
};

use super::json_problem;

/// Handle `GET /api/favorites`.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Favorite>>, ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let favorites = state
        .favorites(|store| store.list())
        .await
        .map_err(|e| from_lib_error(&e, request_id.as_str()))?;

    info!(request_id = %request_id, count = favorites.len(), "listed favorites");
    Ok(Json(favorites))
}

/// Handle `POST /api/favorites`. Answers 201 with the stored record.
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Favorite>), ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let Json(body) = body.map_err(|e| json_problem(e, request_id))?;
    body.validate(request_id).map_err(|problem| *problem)?;

    let favorite = Favorite::from(body);
    info!(request_id, favorite_id = %favorite.id, "adding favorite");

    match state.favorites(move |store| store.add(favorite)).await {
        Ok(stored) => {
            record_favorite_change("add", "ok");
            Ok((StatusCode::CREATED, Json(stored)))
        }
        Err(e) => {
            record_favorite_change("add", outcome(&e));
            Err(from_lib_error(&e, request_id))
        }
    }
}

/// Handle `DELETE /api/favorites/{id}`. Answers 204 with an empty body.
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    info!(request_id, favorite_id = %id, "removing favorite");

    match state.favorites(move |store| store.remove(&id)).await {
        Ok(()) => {
            record_favorite_change("remove", "ok");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            record_favorite_change("remove", outcome(&e));
            Err(from_lib_error(&e, request_id))
        }
    }
}

fn outcome(error: &LibError) -> &'static str {
    match error {
        LibError::FavoriteExists { .. } => "conflict",
        LibError::FavoriteNotFound { .. } => "not_found",
        _ => "error",
    }
}
