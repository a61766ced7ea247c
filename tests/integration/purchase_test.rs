//! Purchase endpoint integration tests.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_then_delete_purchase() {
    let app = TestApp::new();
    let user = Uuid::new_v4().to_string();
    let file = Uuid::new_v4().to_string();

    let id = app
        .create_purchase(&user, &file, "2009-11-10T23:00:00Z")
        .await;
    assert!(!id.is_empty());

    let fetched = app
        .authed("GET", &format!("/purchase/api/{}", id), None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["id"], id);
    assert_eq!(fetched.body["userID"], user);
    assert_eq!(fetched.body["fileID"], file);

    let deleted = app
        .authed("DELETE", &format!("/purchase/api/{}", id), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.id(), id);

    let again = app
        .authed("DELETE", &format!("/purchase/api/{}", id), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert!(again.body.is_null());
}

#[tokio::test]
async fn test_create_rejects_bad_file_id() {
    let app = TestApp::new();
    let response = app
        .authed(
            "POST",
            "/purchase/api/",
            Some(json!({
                "userID": Uuid::new_v4().to_string(),
                "fileID": "not-a-key",
                "date": "2009-11-10T23:00:00Z",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "not correct file id");
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = TestApp::new();
    let token = app.token();
    let response = app
        .raw_request("POST", "/purchase/api/", "{not json".to_string(), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_rejects_malformed_id() {
    let app = TestApp::new();
    let response = app.authed("GET", "/purchase/api/12345", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "not correct id");
}

#[tokio::test]
async fn test_list_is_404_when_empty() {
    let app = TestApp::new();
    let response = app.authed("GET", "/purchase/api/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.authed("GET", "/purchase/api/last/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_and_file_filters() {
    let app = TestApp::new();
    let alice = Uuid::new_v4().to_string();
    let bob = Uuid::new_v4().to_string();
    let file = Uuid::new_v4().to_string();
    let other_file = Uuid::new_v4().to_string();

    app.create_purchase(&alice, &file, "2020-01-01T00:00:00Z").await;
    let latest = app
        .create_purchase(&alice, &other_file, "2020-02-01T00:00:00Z")
        .await;
    app.create_purchase(&bob, &file, "2020-03-01T00:00:00Z").await;

    let by_user = app
        .authed("GET", &format!("/purchase/api/user/{}", alice), None)
        .await;
    assert_eq!(by_user.status, StatusCode::OK);
    assert_eq!(by_user.items().len(), 2);

    let last = app
        .authed("GET", &format!("/purchase/api/last/user/{}", alice), None)
        .await;
    assert_eq!(last.status, StatusCode::OK);
    assert_eq!(last.body["id"], latest);

    let by_file = app
        .authed("GET", &format!("/purchase/api/file/{}", file), None)
        .await;
    assert_eq!(by_file.items().len(), 2);

    let pair = app
        .authed(
            "GET",
            &format!("/purchase/api/user/{}/file/{}", bob, file),
            None,
        )
        .await;
    assert_eq!(pair.items().len(), 1);
    assert_eq!(pair.items()[0]["userID"], bob);
}

#[tokio::test]
async fn test_date_filters() {
    let app = TestApp::new();
    let user = Uuid::new_v4().to_string();
    let file = Uuid::new_v4().to_string();

    app.create_purchase(&user, &file, "2020-01-01T00:00:00Z").await;
    app.create_purchase(&user, &file, "2020-06-01T00:00:00Z").await;
    app.create_purchase(&user, &file, "2021-01-01T00:00:00Z").await;

    let period = app
        .authed(
            "POST",
            "/purchase/api/period",
            Some(json!({
                "start": "2020-01-01T00:00:00Z",
                "end": "2020-12-31T00:00:00Z",
            })),
        )
        .await;
    assert_eq!(period.status, StatusCode::OK);
    assert_eq!(period.items().len(), 2);

    let after = app
        .authed(
            "POST",
            &format!("/purchase/api/after/user/{}", user),
            Some(json!({ "start": "2020-06-01T00:00:00Z" })),
        )
        .await;
    assert_eq!(after.items().len(), 2);

    let before = app
        .authed(
            "POST",
            "/purchase/api/before",
            Some(json!({ "end": "2019-01-01T00:00:00Z" })),
        )
        .await;
    assert_eq!(before.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_period_requires_bounds() {
    let app = TestApp::new();
    let response = app
        .authed(
            "POST",
            "/purchase/api/period",
            Some(json!({ "start": "2020-01-01T00:00:00Z" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "end date is required");
}
