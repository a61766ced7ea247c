//! Comment requests.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use purchase_core::result::AppResult;
use purchase_service::CommentRequest;

use super::required;
use super::rules::{native_id, user_id};
use crate::extractors::{BindRequest, RequestInput};

/// A purchase key taken from `{id}`.
#[derive(Debug, Clone, Validate)]
pub struct PurchaseIdRequest {
    /// Purchase key.
    #[validate(custom(function = "native_id", message = "not correct purchase id"))]
    pub purchase_id: String,
}

impl BindRequest for PurchaseIdRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            purchase_id: input.segment("id", "no purchase id")?,
        })
    }
}

/// A user from `{id}` and a purchase from `{purchase_id}`.
#[derive(Debug, Clone, Validate)]
pub struct UserPurchaseRequest {
    /// User id.
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Purchase key.
    #[validate(custom(function = "native_id", message = "not correct purchase id"))]
    pub purchase_id: String,
}

impl BindRequest for UserPurchaseRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            user_id: input.segment("id", "no user id")?,
            purchase_id: input.segment("purchase_id", "no purchase id")?,
        })
    }
}

/// Body of `POST /comment/api/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Author id.
    #[serde(rename = "userID", default)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Commented purchase.
    #[serde(rename = "purchaseID", default)]
    #[validate(custom(function = "native_id", message = "not correct purchase id"))]
    pub purchase_id: String,
    /// Comment date.
    #[serde(default)]
    #[validate(required(message = "date is required"))]
    pub date: Option<DateTime<Utc>>,
    /// Comment body.
    #[serde(default)]
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

impl CreateCommentRequest {
    /// Service input.
    pub fn into_command(self) -> AppResult<CommentRequest> {
        Ok(CommentRequest {
            user_id: self.user_id,
            purchase_id: self.purchase_id,
            date: required(self.date, "date is required")?,
            text: self.text,
        })
    }
}

impl BindRequest for CreateCommentRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// `{id}` plus the body of `PUT /comment/api/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    /// Comment key.
    #[serde(skip)]
    #[validate(custom(function = "native_id", message = "not correct id"))]
    pub id: String,
    /// Author id.
    #[serde(rename = "userID", default)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Commented purchase.
    #[serde(rename = "purchaseID", default)]
    #[validate(custom(function = "native_id", message = "not correct purchase id"))]
    pub purchase_id: String,
    /// Comment date.
    #[serde(default)]
    #[validate(required(message = "date is required"))]
    pub date: Option<DateTime<Utc>>,
    /// Comment body.
    #[serde(default)]
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

impl UpdateCommentRequest {
    /// Comment key and service input.
    pub fn into_command(self) -> AppResult<(String, CommentRequest)> {
        let command = CommentRequest {
            user_id: self.user_id,
            purchase_id: self.purchase_id,
            date: required(self.date, "date is required")?,
            text: self.text,
        };
        Ok((self.id, command))
    }
}

impl BindRequest for UpdateCommentRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        let mut req: Self = input.json()?;
        req.id = input.segment("id", "no id")?;
        Ok(req)
    }
}

/// Body of `POST /comment/text`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TextRequest {
    /// Regular expression matched against comment bodies.
    #[serde(default)]
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

impl BindRequest for TextRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// Body of `POST /comment/period`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentPeriodRequest {
    /// Inclusive lower bound.
    #[serde(default)]
    #[validate(required(message = "invalid start"))]
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    #[serde(default)]
    #[validate(required(message = "invalid end"))]
    pub end: Option<DateTime<Utc>>,
}

impl CommentPeriodRequest {
    /// Both bounds.
    pub fn bounds(self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            required(self.start, "invalid start")?,
            required(self.end, "invalid end")?,
        ))
    }
}

impl BindRequest for CommentPeriodRequest {
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

    #[test]
    fn test_empty_text_is_invalid_not_malformed() {
        let input = RequestInput::new(HashMap::new(), r#"{"text": ""}"#);
        let err = bind_and_validate::<TextRequest>(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.message, "text is required");

        let input = RequestInput::new(HashMap::new(), r#"{"text": 5}"#);
        let err = bind_and_validate::<TextRequest>(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput);
    }

    #[test]
    fn test_comment_period_messages() {
        let input = RequestInput::new(HashMap::new(), r#"{"start":"2021-01-01T00:00:00Z"}"#);
        let err = bind_and_validate::<CommentPeriodRequest>(&input).unwrap_err();
        assert_eq!(err.message, "invalid end");
    }

    #[test]
    fn test_update_comment_takes_id_from_path() {
        let id = "0191d3c8-7a2b-7c3e-9f10-2b3c4d5e6f70";
        let body = format!(
            r#"{{"id":"ignored","userID":"42","purchaseID":"{id}","date":"2021-03-01T12:00:00Z","text":"ok"}}"#
        );
        let input = RequestInput::new(HashMap::from([("id".to_string(), id.to_string())]), body);
        let (key, cmd) = bind_and_validate::<UpdateCommentRequest>(&input)
            .unwrap()
            .into_command()
            .unwrap();
        assert_eq!(key, id);
        assert_eq!(cmd.text, "ok");
    }

    #[test]
    fn test_create_comment_reports_first_field() {
        let input = RequestInput::new(HashMap::new(), "{}");
        let err = bind_and_validate::<CreateCommentRequest>(&input).unwrap_err();
        assert_eq!(err.message, "date is required");
    }
}
