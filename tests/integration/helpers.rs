//! Shared test helpers for integration tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use purchase_auth::JwtEncoder;
use purchase_core::config::{AppConfig, StoreProvider, UserIdFormat};
use purchase_core::error::AppError;
use purchase_core::result::AppResult;
use purchase_core::traits::UserDirectory;
use purchase_core::types::UserId;
use purchase_database::Repositories;

/// User directory that knows a fixed set of users.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    users: Mutex<HashSet<String>>,
    down: Mutex<bool>,
}

impl FakeDirectory {
    /// Register a user and return its id.
    pub fn add_user(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.users.lock().unwrap().insert(id.clone());
        id
    }

    /// Make every lookup fail at the transport level.
    pub fn go_down(&self) {
        *self.down.lock().unwrap() = true;
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn user_exists(&self, id: &UserId) -> AppResult<bool> {
        if *self.down.lock().unwrap() {
            return Err(AppError::upstream("connection refused"));
        }
        Ok(self.users.lock().unwrap().contains(id.as_str()))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory consulted by the comment service
    pub directory: Arc<FakeDirectory>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.identity.user_id_format = UserIdFormat::Uuid;
        config.auth.jwt_secret = "integration-secret".to_string();

        let directory = Arc::new(FakeDirectory::default());
        let state = purchase_api::AppState::new(
            config.clone(),
            Repositories::memory(config.identity.user_id_format),
            directory.clone(),
        );
        let router = purchase_api::build_app(state);

        Self {
            router,
            directory,
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// A valid bearer token
    pub fn token(&self) -> String {
        self.encoder.issue("tester").expect("Failed to issue token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, token).await
    }

    /// Make an HTTP request with a literal body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {}", t));
        self.dispatch(method, path, body, authorization).await
    }

    /// Make a bodiless request with a literal `Authorization` header
    pub async fn raw_request_with_header(
        &self,
        method: &str,
        path: &str,
        authorization: &str,
    ) -> TestResponse {
        self.dispatch(method, path, String::new(), Some(authorization.to_string()))
            .await
    }

    async fn dispatch(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<String>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Request with a valid token
    pub async fn authed(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let token = self.token();
        self.request(method, path, body, Some(&token)).await
    }

    /// Create a purchase and return its id
    pub async fn create_purchase(&self, user_id: &str, file_id: &str, date: &str) -> String {
        let response = self
            .authed(
                "POST",
                "/purchase/api/",
                Some(serde_json::json!({
                    "userID": user_id,
                    "fileID": file_id,
                    "date": date,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Body as a bare JSON string id
    pub fn id(&self) -> String {
        self.body
            .as_str()
            .expect("Response body is not a string id")
            .to_string()
    }

    /// Body as a JSON array
    pub fn items(&self) -> &Vec<Value> {
        self.body.as_array().expect("Response body is not an array")
    }

    /// The `message` of an error body
    pub fn message(&self) -> &str {
        self.body
            .get("message")
            .and_then(|v| v.as_str())
            .expect("Response body has no message")
    }
}
