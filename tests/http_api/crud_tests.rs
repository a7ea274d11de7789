//! Status codes and bodies of the record endpoints.

use super::helpers::{app, create, send};
use axum::{
    Router,
    http::{Method, StatusCode},
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_update_delete_walkthrough(app: Router) {
    let created = create(
        &app,
        json!({
            "title": "Test Record",
            "details": "x",
            "is_done": false,
            "record_date": "2025-01-01T00:00:00"
        }),
    )
    .await;
    let id = created["id"].as_i64().expect("numeric id");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_null());
    assert_eq!(created["record_date"], "2025-01-01T00:00:00Z");

    let updated = send(
        &app,
        Method::PUT,
        &format!("/records/{id}"),
        Some(json!({"is_done": true})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    let updated_body = updated.json();
    assert_eq!(updated_body["is_done"], true);
    assert_eq!(updated_body["title"], "Test Record");
    assert!(updated_body["updated_at"].is_string());

    let deleted = send(&app, Method::DELETE, &format!("/records/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let fetched = send(&app, Method::GET, &format!("/records/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_json_has_every_field(app: Router) {
    let created = create(&app, json!({"title": "Shape check"})).await;

    let object = created.as_object().expect("object body");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["created_at", "details", "id", "is_done", "record_date", "title", "updated_at"]
    );
    assert!(created["details"].is_null());
    assert_eq!(created["is_done"], false);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_returns_the_created_record(app: Router) {
    let created = create(&app, json!({"title": "Fetch me", "details": "please"})).await;
    let id = created["id"].as_i64().expect("numeric id");

    let fetched = send(&app, Method::GET, &format!("/records/{id}"), None).await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_null_details_clears_them(app: Router) {
    let created = create(&app, json!({"title": "Clear me", "details": "temporary"})).await;
    let id = created["id"].as_i64().expect("numeric id");

    let updated = send(
        &app,
        Method::PUT,
        &format!("/records/{id}"),
        Some(json!({"details": null})),
    )
    .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.json()["details"].is_null());
}

#[rstest]
#[case(Method::GET, None)]
#[case(Method::PUT, Some(json!({"is_done": true})))]
#[case(Method::DELETE, None)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_records_are_not_found(
    app: Router,
    #[case] method: Method,
    #[case] body: Option<serde_json::Value>,
) {
    let response = send(&app, method, "/records/999", body).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "NOT_FOUND");
}
