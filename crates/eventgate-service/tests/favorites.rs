mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use common::harness;
use eventgate_service_shared::{
    PROBLEM_FAVORITE_EXISTS, PROBLEM_FAVORITE_NOT_FOUND, PROBLEM_INVALID_REQUEST,
};

#[tokio::test]
async fn favorites_start_empty() {
    let h = harness().await;

    let response = h.server.get("/api/favorites").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn add_list_remove_lifecycle() {
    let h = harness().await;
    let favorite = json!({
        "id": "evt1",
        "name": "Jazz Night",
        "date": "2026-11-02",
        "venue": "Blue Note"
    });

    let created = h.server.post("/api/favorites").json(&favorite).await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    assert_eq!(created.json::<Value>(), favorite);

    let listed = h.server.get("/api/favorites").await;
    assert_eq!(listed.json::<Value>(), json!([favorite]));

    let removed = h.server.delete("/api/favorites/evt1").await;
    assert_eq!(removed.status_code(), StatusCode::NO_CONTENT);
    assert!(removed.as_bytes().is_empty());

    let listed = h.server.get("/api/favorites").await;
    assert_eq!(listed.json::<Value>(), json!([]));
}

#[tokio::test]
async fn duplicate_favorite_is_conflict() {
    let h = harness().await;
    let favorite = json!({"id": "evt1", "name": "Jazz Night"});

    let first = h.server.post("/api/favorites").json(&favorite).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = h
        .server
        .post("/api/favorites")
        .json(&json!({"id": "evt1", "name": "Renamed"}))
        .await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(second.json::<Value>()["type"], PROBLEM_FAVORITE_EXISTS);

    let listed: Vec<Value> = h.server.get("/api/favorites").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Jazz Night");
}

#[tokio::test]
async fn removing_unknown_favorite_is_not_found() {
    let h = harness().await;

    let response = h.server.delete("/api/favorites/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let problem: Value = response.json();
    assert_eq!(problem["type"], PROBLEM_FAVORITE_NOT_FOUND);
    assert!(problem["detail"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn favorite_without_name_is_bad_request() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/favorites")
        .json(&json!({"id": "evt1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["type"], PROBLEM_INVALID_REQUEST);

    let listed: Vec<Value> = h.server.get("/api/favorites").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn generated_request_id_is_echoed() {
    let h = harness().await;

    let response = h.server.get("/api/favorites").await;
    let id = response.headers().get("x-request-id").unwrap();
    assert_eq!(id.to_str().unwrap().len(), 36);

    let supplied = h
        .server
        .get("/api/favorites")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-42"),
        )
        .await;
    assert_eq!(supplied.headers().get("x-request-id").unwrap(), "trace-42");
}
