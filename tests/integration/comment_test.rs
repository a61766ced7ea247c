//! Comment endpoint integration tests.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

fn comment_body(user: &str, purchase: &str, text: &str) -> Value {
    json!({
        "userID": user,
        "purchaseID": purchase,
        "date": "2021-05-04T10:00:00Z",
        "text": text,
    })
}

#[tokio::test]
async fn test_create_and_read_comment() {
    let app = TestApp::new();
    let user = app.directory.add_user();
    let purchase = Uuid::new_v4().to_string();

    let created = app
        .authed(
            "POST",
            "/comment/api/",
            Some(comment_body(&user, &purchase, "works fine")),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let id = created.id();

    let fetched = app
        .authed("GET", &format!("/comment/api/{}", id), None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["text"], "works fine");
    assert_eq!(fetched.body["purchaseID"], purchase);

    let by_user = app
        .request("GET", &format!("/comment/user/{}", user), None, None)
        .await;
    assert_eq!(by_user.status, StatusCode::OK);
    assert_eq!(by_user.items().len(), 1);

    let by_purchase = app
        .request("GET", &format!("/comment/purchase/{}", purchase), None, None)
        .await;
    assert_eq!(by_purchase.items().len(), 1);

    let pair = app
        .request(
            "GET",
            &format!("/comment/user/{}/purchase/{}", user, purchase),
            None,
            None,
        )
        .await;
    assert_eq!(pair.items()[0]["id"], id);
}

#[tokio::test]
async fn test_create_for_unknown_user_is_404() {
    let app = TestApp::new();
    let stranger = Uuid::new_v4().to_string();

    let response = app
        .authed(
            "POST",
            "/comment/api/",
            Some(comment_body(&stranger, &Uuid::new_v4().to_string(), "hi")),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let listed = app.authed("GET", "/comment/api/", None).await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_directory_outage_is_500() {
    let app = TestApp::new();
    let user = app.directory.add_user();
    app.directory.go_down();

    let response = app
        .authed(
            "POST",
            "/comment/api/",
            Some(comment_body(&user, &Uuid::new_v4().to_string(), "hi")),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_update_comment() {
    let app = TestApp::new();
    let user = app.directory.add_user();
    let purchase = Uuid::new_v4().to_string();

    let id = app
        .authed(
            "POST",
            "/comment/api/",
            Some(comment_body(&user, &purchase, "first")),
        )
        .await
        .id();

    let updated = app
        .authed(
            "PUT",
            &format!("/comment/api/{}", id),
            Some(comment_body(&user, &purchase, "second")),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.id(), id);

    let fetched = app
        .authed("GET", &format!("/comment/api/{}", id), None)
        .await;
    assert_eq!(fetched.body["text"], "second");
}

#[tokio::test]
async fn test_delete_comment() {
    let app = TestApp::new();
    let user = app.directory.add_user();

    let id = app
        .authed(
            "POST",
            "/comment/api/",
            Some(comment_body(&user, &Uuid::new_v4().to_string(), "bye")),
        )
        .await
        .id();

    let deleted = app
        .authed("DELETE", &format!("/comment/api/{}", id), None)
        .await;
    assert_eq!(deleted.id(), id);

    let fetched = app
        .authed("GET", &format!("/comment/api/{}", id), None)
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_text_search_requires_text() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/comment/text", Some(json!({ "text": "" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "text is required");
}

#[tokio::test]
async fn test_text_search() {
    let app = TestApp::new();
    let user = app.directory.add_user();

    let missing = app
        .request("POST", "/comment/text", Some(json!({ "text": "some" })), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    app.authed(
        "POST",
        "/comment/api/",
        Some(comment_body(&user, &Uuid::new_v4().to_string(), "awesome tool")),
    )
    .await;

    let found = app
        .request("POST", "/comment/text", Some(json!({ "text": "some" })), None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.items().len(), 1);
}

#[tokio::test]
async fn test_period_requires_start() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/comment/period",
            Some(json!({ "end": "2021-05-04T10:00:00Z" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "invalid start");
}
