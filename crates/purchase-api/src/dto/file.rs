//! File requests.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use purchase_core::result::AppResult;
use purchase_service::FileRequest;

use super::required;
use super::rules::{native_id, user_id};
use crate::extractors::{BindRequest, RequestInput};

/// A file name taken from `{name}`.
#[derive(Debug, Clone, Validate)]
pub struct FileNameRequest {
    /// Exact file name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

impl BindRequest for FileNameRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            name: input.segment("name", "no name")?,
        })
    }
}

/// An author id taken from `{id}`.
#[derive(Debug, Clone, Validate)]
pub struct AuthorIdRequest {
    /// Author id.
    #[validate(custom(function = "user_id", message = "not correct author id"))]
    pub author_id: String,
}

impl BindRequest for AuthorIdRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            author_id: input.segment("id", "no user id")?,
        })
    }
}

/// Body of `POST /file/api/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Size in bytes.
    #[serde(default)]
    #[validate(range(min = 1, message = "not correct size"))]
    pub size: i64,
    /// Storage path.
    #[serde(default)]
    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,
    /// Add date.
    #[serde(rename = "addDate", default)]
    #[validate(required(message = "add date is required"))]
    pub add_date: Option<DateTime<Utc>>,
    /// Update date.
    #[serde(rename = "updateDate", default)]
    #[validate(required(message = "update date is required"))]
    pub update_date: Option<DateTime<Utc>>,
    /// Published flag.
    #[serde(default)]
    pub actual: bool,
    /// Author id.
    #[serde(rename = "authorID", default)]
    #[validate(custom(function = "user_id", message = "not correct author id"))]
    pub author_id: String,
}

impl CreateFileRequest {
    /// Service input.
    pub fn into_command(self) -> AppResult<FileRequest> {
        Ok(FileRequest {
            name: self.name,
            description: self.description,
            size: self.size,
            path: self.path,
            add_date: required(self.add_date, "add date is required")?,
            update_date: required(self.update_date, "update date is required")?,
            actual: self.actual,
            author_id: self.author_id,
        })
    }
}

impl BindRequest for CreateFileRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// `{id}` plus the body of `PUT /file/api/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// File key.
    #[serde(skip)]
    #[validate(custom(function = "native_id", message = "not correct id"))]
    pub id: String,
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Size in bytes.
    #[serde(default)]
    #[validate(range(min = 1, message = "not correct size"))]
    pub size: i64,
    /// Storage path.
    #[serde(default)]
    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,
    /// Add date.
    #[serde(rename = "addDate", default)]
    #[validate(required(message = "add date is required"))]
    pub add_date: Option<DateTime<Utc>>,
    /// Update date.
    #[serde(rename = "updateDate", default)]
    #[validate(required(message = "update date is required"))]
    pub update_date: Option<DateTime<Utc>>,
    /// Published flag.
    #[serde(default)]
    pub actual: bool,
    /// Author id.
    #[serde(rename = "authorID", default)]
    #[validate(custom(function = "user_id", message = "not correct author id"))]
    pub author_id: String,
}

impl UpdateFileRequest {
    /// File key and service input.
    pub fn into_command(self) -> AppResult<(String, FileRequest)> {
        let command = FileRequest {
            name: self.name,
            description: self.description,
            size: self.size,
            path: self.path,
            add_date: required(self.add_date, "add date is required")?,
            update_date: required(self.update_date, "update date is required")?,
            actual: self.actual,
            author_id: self.author_id,
        };
        Ok((self.id, command))
    }
}

impl BindRequest for UpdateFileRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        let mut req: Self = input.json()?;
        req.id = input.segment("id", "no id")?;
        Ok(req)
    }
}
