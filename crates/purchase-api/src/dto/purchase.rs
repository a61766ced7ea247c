//! Purchase requests.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use purchase_core::result::AppResult;

use super::required;
use super::rules::{native_id, user_id};
use crate::extractors::{BindRequest, RequestInput};

/// A file key taken from `{file_id}`.
#[derive(Debug, Clone, Validate)]
pub struct FileIdRequest {
    /// File key.
    #[validate(custom(function = "native_id", message = "not correct file id"))]
    pub file_id: String,
}

impl BindRequest for FileIdRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            file_id: input.segment("file_id", "no file id")?,
        })
    }
}

/// A user from `{id}` and a file from `{file_id}`.
#[derive(Debug, Clone, Validate)]
pub struct UserFileRequest {
    /// User id.
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// File key.
    #[validate(custom(function = "native_id", message = "not correct file id"))]
    pub file_id: String,
}

impl BindRequest for UserFileRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            user_id: input.segment("id", "no user id")?,
            file_id: input.segment("file_id", "no file id")?,
        })
    }
}

/// Body of `POST /purchase/api/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    /// Buyer id.
    #[serde(rename = "userID", default)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Purchase date.
    #[serde(default)]
    #[validate(required(message = "date is required"))]
    pub date: Option<DateTime<Utc>>,
    /// Purchased file.
    #[serde(rename = "fileID", default)]
    #[validate(custom(function = "native_id", message = "not correct file id"))]
    pub file_id: String,
}

impl CreatePurchaseRequest {
    /// Service input.
    pub fn into_command(self) -> AppResult<purchase_service::CreatePurchaseRequest> {
        Ok(purchase_service::CreatePurchaseRequest {
            user_id: self.user_id,
            date: required(self.date, "date is required")?,
            file_id: self.file_id,
        })
    }
}

impl BindRequest for CreatePurchaseRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use purchase_core::ErrorKind;

    use super::*;
    use crate::extractors::validated::bind_and_validate;

    const FILE: &str = "0191d3c8-7a2b-7c3e-9f10-2b3c4d5e6f70";

    fn body(json: String) -> RequestInput {
        RequestInput::new(HashMap::new(), json)
    }

    #[test]
    fn test_create_purchase_binds_wire_names() {
        let input = body(format!(
            r#"{{"userID":"42","fileID":"{FILE}","date":"2009-11-10T23:00:00Z"}}"#
        ));
        let cmd = bind_and_validate::<CreatePurchaseRequest>(&input)
            .unwrap()
            .into_command()
            .unwrap();
        assert_eq!(cmd.user_id, "42");
        assert_eq!(cmd.file_id, FILE);
        assert_eq!(cmd.date.to_rfc3339(), "2009-11-10T23:00:00+00:00");
    }

    #[test]
    fn test_create_purchase_messages() {
        let input = body(format!(r#"{{"userID":"42","fileID":"{FILE}"}}"#));
        let err = bind_and_validate::<CreatePurchaseRequest>(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.message, "date is required");

        let input = body(r#"{"userID":"42","fileID":"x","date":"2009-11-10T23:00:00Z"}"#.into());
        let err = bind_and_validate::<CreatePurchaseRequest>(&input).unwrap_err();
        assert_eq!(err.message, "not correct file id");

        let input = body(format!(
            r#"{{"userID":"","fileID":"{FILE}","date":"2009-11-10T23:00:00Z"}}"#
        ));
        let err = bind_and_validate::<CreatePurchaseRequest>(&input).unwrap_err();
        assert_eq!(err.message, "not correct user id");
    }

    #[test]
    fn test_user_file_request() {
        let input = RequestInput::new(
            HashMap::from([
                ("id".to_string(), "42".to_string()),
                ("file_id".to_string(), FILE.to_string()),
            ]),
            "",
        );
        let req = bind_and_validate::<UserFileRequest>(&input).unwrap();
        assert_eq!(req.user_id, "42");

        let input = RequestInput::new(HashMap::from([("id".to_string(), "42".to_string())]), "");
        let err = bind_and_validate::<UserFileRequest>(&input).unwrap_err();
        assert_eq!(err.message, "no file id");
    }
}
