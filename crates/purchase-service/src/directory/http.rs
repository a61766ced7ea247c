//! User directory reached over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use purchase_core::config::UserDirectoryConfig;
use purchase_core::error::{AppError, ErrorKind};
use purchase_core::result::AppResult;
use purchase_core::traits::UserDirectory;
use purchase_core::types::UserId;

/// Reply body of the existence endpoint.
#[derive(Debug, Deserialize)]
struct ExistsReply {
    exists: bool,
}

/// Asks the user service `GET {base_url}/api/user/{id}/exists`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpUserDirectory {
    /// Build a directory client with the configured per-call deadline.
    pub fn new(config: &UserDirectoryConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build user directory client",
                    e,
                )
            })?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid user directory url '{}'", config.base_url),
                e,
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Invalid user directory url '{}'",
                config.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// The id always lands in exactly one path segment, percent-encoded.
    fn exists_url(&self, id: &UserId) -> AppResult<Url> {
        let id = id.as_str();
        // Dot segments are dropped by URL normalization.
        if id == "." || id == ".." {
            return Err(AppError::conversion("invalid user id"));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("Invalid user directory url"))?
            .pop_if_empty()
            .extend(["api", "user", id, "exists"]);
        Ok(url)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn user_exists(&self, id: &UserId) -> AppResult<bool> {
        let url = self.exists_url(id)?;
        debug!(url = %url, "Checking user existence");

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "User directory unreachable", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), user_id = %id, "User directory returned error status");
            return Err(AppError::upstream(format!(
                "User directory returned status {status}"
            )));
        }

        let reply: ExistsReply = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Unexpected user directory reply", e)
        })?;
        Ok(reply.exists)
    }
}

#[cfg(test)]
mod tests {
    use purchase_core::config::UserIdFormat;

    use super::*;

    fn directory(base_url: String) -> HttpUserDirectory {
        HttpUserDirectory::new(&UserDirectoryConfig {
            base_url,
            timeout_seconds: 2,
        })
        .unwrap()
    }

    fn user(raw: &str) -> UserId {
        UserId::from_stored(raw.to_string())
    }

    #[tokio::test]
    async fn test_user_exists() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user/42/exists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"exists":true}"#)
            .create_async()
            .await;

        assert!(directory(server.url()).user_exists(&user("42")).await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_absent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/43/exists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"exists":false}"#)
            .create_async()
            .await;

        assert!(!directory(server.url()).user_exists(&user("43")).await.unwrap());
    }

    #[tokio::test]
    async fn test_error_status_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/44/exists")
            .with_status(503)
            .create_async()
            .await;

        let err = directory(server.url())
            .user_exists(&user("44"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
    }

    #[tokio::test]
    async fn test_bad_body_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/45/exists")
            .with_status(200)
            .with_body("yes")
            .create_async()
            .await;

        let err = directory(server.url())
            .user_exists(&user("45"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
    }

    #[tokio::test]
    async fn test_id_cannot_redirect_lookup() {
        let mut server = mockito::Server::new_async().await;
        let alice = server
            .mock("GET", "/api/user/alice/exists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"exists":true}"#)
            .expect(0)
            .create_async()
            .await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"exists":false}"#)
            .create_async()
            .await;

        let dir = directory(server.url());
        let id = UserId::parse("alice/exists?", UserIdFormat::Opaque).unwrap();
        assert!(!dir.user_exists(&id).await.unwrap());
        alice.assert_async().await;
    }

    #[test]
    fn test_exists_url_encodes_id() {
        let dir = directory("http://users.local/".to_string());
        assert_eq!(
            dir.exists_url(&user("7")).unwrap().as_str(),
            "http://users.local/api/user/7/exists"
        );
        assert_eq!(
            dir.exists_url(&user("alice/exists?")).unwrap().as_str(),
            "http://users.local/api/user/alice%2Fexists%3F/exists"
        );
        assert_eq!(
            dir.exists_url(&user("a#b")).unwrap().as_str(),
            "http://users.local/api/user/a%23b/exists"
        );

        let prefixed = directory("http://users.local/directory".to_string());
        assert_eq!(
            prefixed.exists_url(&user("7")).unwrap().as_str(),
            "http://users.local/directory/api/user/7/exists"
        );
    }

    #[test]
    fn test_dot_ids_are_rejected() {
        let dir = directory("http://users.local".to_string());
        for raw in [".", ".."] {
            let err = dir.exists_url(&user(raw)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Conversion);
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpUserDirectory::new(&UserDirectoryConfig {
            base_url: "not a url".to_string(),
            timeout_seconds: 2,
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
