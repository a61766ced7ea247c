//! File catalog integration tests.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

fn file_body(name: &str, author: &str, actual: bool, add_date: &str) -> Value {
    json!({
        "name": name,
        "description": "orbit data",
        "size": 2048,
        "path": format!("/data/{}", name),
        "addDate": add_date,
        "updateDate": add_date,
        "actual": actual,
        "authorID": author,
    })
}

async fn create_file(app: &TestApp, body: Value) -> String {
    let response = app.authed("POST", "/file/api/", Some(body)).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.id()
}

#[tokio::test]
async fn test_file_crud() {
    let app = TestApp::new();
    let author = Uuid::new_v4().to_string();

    let id = create_file(
        &app,
        file_body("scene.tif", &author, true, "2022-01-01T00:00:00Z"),
    )
    .await;

    let fetched = app.authed("GET", &format!("/file/api/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "scene.tif");
    assert_eq!(fetched.body["authorID"], author);
    assert_eq!(fetched.body["size"], 2048);

    let updated = app
        .authed(
            "PUT",
            &format!("/file/api/{}", id),
            Some(file_body("scene-v2.tif", &author, false, "2022-02-01T00:00:00Z")),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.id(), id);

    let fetched = app.authed("GET", &format!("/file/api/{}", id), None).await;
    assert_eq!(fetched.body["name"], "scene-v2.tif");
    assert_eq!(fetched.body["actual"], false);

    let deleted = app
        .authed("DELETE", &format!("/file/api/{}", id), None)
        .await;
    assert_eq!(deleted.id(), id);

    let gone = app.authed("GET", &format!("/file/api/{}", id), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_file_validation() {
    let app = TestApp::new();
    let author = Uuid::new_v4().to_string();

    let mut body = file_body("scene.tif", &author, true, "2022-01-01T00:00:00Z");
    body["size"] = json!(0);
    let response = app.authed("POST", "/file/api/", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "not correct size");

    let mut body = file_body("scene.tif", &author, true, "2022-01-01T00:00:00Z");
    body.as_object_mut().unwrap().remove("addDate");
    let response = app.authed("POST", "/file/api/", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "add date is required");
}

#[tokio::test]
async fn test_public_catalog_queries() {
    let app = TestApp::new();
    let author = Uuid::new_v4().to_string();
    let other = Uuid::new_v4().to_string();

    create_file(
        &app,
        file_body("a.tif", &author, true, "2022-01-01T00:00:00Z"),
    )
    .await;
    create_file(
        &app,
        file_body("b.tif", &author, false, "2022-06-01T00:00:00Z"),
    )
    .await;
    create_file(
        &app,
        file_body("a.tif", &other, true, "2023-01-01T00:00:00Z"),
    )
    .await;

    let all = app.request("GET", "/file/", None, None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.items().len(), 3);

    let named = app.request("GET", "/file/a.tif", None, None).await;
    assert_eq!(named.items().len(), 2);

    let actual = app.request("GET", "/file/actual/", None, None).await;
    assert_eq!(actual.items().len(), 2);

    let expired = app.request("GET", "/file/expired/", None, None).await;
    assert_eq!(expired.items().len(), 1);
    assert_eq!(expired.items()[0]["name"], "b.tif");

    let added = app
        .request(
            "POST",
            "/file/added",
            Some(json!({
                "start": "2022-01-01T00:00:00Z",
                "end": "2022-12-31T00:00:00Z",
            })),
            None,
        )
        .await;
    assert_eq!(added.items().len(), 2);

    let by_author = app
        .authed("GET", &format!("/file/api/author/{}", other), None)
        .await;
    assert_eq!(by_author.items().len(), 1);
}

#[tokio::test]
async fn test_file_writes_need_token() {
    let app = TestApp::new();
    let body = file_body(
        "scene.tif",
        &Uuid::new_v4().to_string(),
        true,
        "2022-01-01T00:00:00Z",
    );

    let response = app.request("POST", "/file/api/", Some(body), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let listed = app.request("GET", "/file/", None, None).await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}
