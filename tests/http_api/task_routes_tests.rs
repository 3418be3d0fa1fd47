//! Create, list, update, and delete round trips through the HTTP surface.

use crate::http_api::helpers::{TestApp, app, send};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use taskdeck::task::ports::TaskRepository;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_list_returns_store_assigned_id(app: TestApp) {
    let created = send(
        &app.router,
        Method::POST,
        "/tasks",
        Some(r#"{"title":"buy milk"}"#),
    )
    .await;

    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json(), json!({ "result": 1 }));

    let listed = send(&app.router, Method::GET, "/tasks", None).await;

    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(
        listed.json(),
        json!([{ "id": 1, "title": "buy milk", "description": "", "status": "pending" }])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_ignores_caller_supplied_id(app: TestApp) {
    let created = send(
        &app.router,
        Method::POST,
        "/tasks",
        Some(r#"{"id":50,"title":"water plants","status":"in_progress"}"#),
    )
    .await;

    assert_eq!(created.json(), json!({ "result": 1 }));
    let stored = app.persistent.get_all().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.first().map(|task| task.id().value()), Some(1));
}

#[rstest]
#[case(Method::POST, "{\"title\":")]
#[case(Method::PUT, "not json")]
#[case(Method::POST, r#"{"description":"no title"}"#)]
#[case(Method::PUT, r#"{"id":1,"title":"x","status":"archived"}"#)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_create_or_update_body_is_bad_request(
    app: TestApp,
    #[case] method: Method,
    #[case] body: &str,
) {
    let response = send(&app.router, method, "/tasks", Some(body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let error = response.json();
    assert!(error.get("error").and_then(|value| value.as_str()).is_some());
    assert_eq!(error.as_object().map(serde_json::Map::len), Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_bad_request(app: TestApp) {
    let response = send(&app.router, Method::POST, "/tasks", Some(r#"{"title":"  "}"#)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "task title must not be empty" })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_title_is_listed_as_submitted(app: TestApp) {
    let created = send(
        &app.router,
        Method::POST,
        "/tasks",
        Some(r#"{"title":"  buy milk "}"#),
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);

    let listed = send(&app.router, Method::GET, "/tasks", None).await;

    assert_eq!(
        listed.json(),
        json!([{ "id": 1, "title": "  buy milk ", "description": "", "status": "pending" }])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_without_id_is_bad_request(app: TestApp) {
    let response = send(&app.router, Method::PUT, "/tasks", Some(r#"{"title":"x"}"#)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "task id is required" }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_task_and_echoes_id(app: TestApp) {
    send(
        &app.router,
        Method::POST,
        "/tasks",
        Some(r#"{"title":"draft","description":"first pass"}"#),
    )
    .await;

    let updated = send(
        &app.router,
        Method::PUT,
        "/tasks",
        Some(r#"{"id":1,"title":"final","status":"done"}"#),
    )
    .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json(), json!({ "result": 1 }));
    let listed = send(&app.router, Method::GET, "/tasks", None).await;
    assert_eq!(
        listed.json(),
        json!([{ "id": 1, "title": "final", "description": "", "status": "done" }])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_id_is_server_error(app: TestApp) {
    let response = send(
        &app.router,
        Method::PUT,
        "/tasks",
        Some(r#"{"id":9,"title":"ghost"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({ "error": "task not found: 9" }));
    assert!(app.persistent.get_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_answers_empty_body_and_removes_task(app: TestApp) {
    send(&app.router, Method::POST, "/tasks", Some(r#"{"title":"keep"}"#)).await;
    send(&app.router, Method::POST, "/tasks", Some(r#"{"title":"drop"}"#)).await;

    let deleted = send(&app.router, Method::DELETE, "/tasks", Some(r#"{"id":2}"#)).await;

    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.is_empty());
    let listed = send(&app.router, Method::GET, "/tasks", None).await;
    assert_eq!(
        listed.json(),
        json!([{ "id": 1, "title": "keep", "description": "", "status": "pending" }])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_of_missing_id_is_server_error(app: TestApp) {
    let response = send(&app.router, Method::DELETE, "/tasks", Some(r#"{"id":3}"#)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({ "error": "task not found: 3" }));
}

#[rstest]
#[case("{\"id\":")]
#[case(r#"{"id":"one"}"#)]
#[case("")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_delete_body_is_server_error(app: TestApp, #[case] body: &str) {
    let response = send(&app.router, Method::DELETE, "/tasks", Some(body)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json().get("error").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_to_persistent_store_leave_static_listing_untouched(app: TestApp) {
    let before = send(&app.router, Method::GET, "/tasks/static", None).await;
    send(&app.router, Method::POST, "/tasks", Some(r#"{"title":"new"}"#)).await;
    send(&app.router, Method::DELETE, "/tasks", Some(r#"{"id":1}"#)).await;

    let after = send(&app.router, Method::GET, "/tasks/static", None).await;

    assert_eq!(before.json(), after.json());
}
