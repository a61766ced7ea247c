//! Requests shared by more than one resource.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use purchase_core::result::AppResult;

use super::required;
use super::rules::{native_id, user_id};
use crate::extractors::{BindRequest, RequestInput};

/// A document key taken from `{id}`.
#[derive(Debug, Clone, Validate)]
pub struct IdRequest {
    /// Document key.
    #[validate(custom(function = "native_id", message = "not correct id"))]
    pub id: String,
}

impl BindRequest for IdRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            id: input.segment("id", "no id")?,
        })
    }
}

/// A user id taken from `{id}`.
#[derive(Debug, Clone, Validate)]
pub struct UserIdRequest {
    /// User id.
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
}

impl BindRequest for UserIdRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        Ok(Self {
            user_id: input.segment("id", "no user id")?,
        })
    }
}

/// A closed date range in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PeriodRequest {
    /// Inclusive lower bound.
    #[serde(default)]
    #[validate(required(message = "start date is required"))]
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    #[serde(default)]
    #[validate(required(message = "end date is required"))]
    pub end: Option<DateTime<Utc>>,
}

impl PeriodRequest {
    /// Both bounds.
    pub fn bounds(self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            required(self.start, "start date is required")?,
            required(self.end, "end date is required")?,
        ))
    }
}

impl BindRequest for PeriodRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// A lower date bound in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AfterDateRequest {
    /// Inclusive lower bound.
    #[serde(default)]
    #[validate(required(message = "start date is required"))]
    pub start: Option<DateTime<Utc>>,
}

impl AfterDateRequest {
    /// The bound.
    pub fn start(self) -> AppResult<DateTime<Utc>> {
        required(self.start, "start date is required")
    }
}

impl BindRequest for AfterDateRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// An upper date bound in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BeforeDateRequest {
    /// Inclusive upper bound.
    #[serde(default)]
    #[validate(required(message = "end date is required"))]
    pub end: Option<DateTime<Utc>>,
}

impl BeforeDateRequest {
    /// The bound.
    pub fn end(self) -> AppResult<DateTime<Utc>> {
        required(self.end, "end date is required")
    }
}

impl BindRequest for BeforeDateRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        input.json()
    }
}

/// A user id from `{id}` plus a closed date range in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserPeriodRequest {
    /// User id.
    #[serde(skip)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Inclusive lower bound.
    #[serde(default)]
    #[validate(required(message = "start date is required"))]
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    #[serde(default)]
    #[validate(required(message = "end date is required"))]
    pub end: Option<DateTime<Utc>>,
}

impl UserPeriodRequest {
    /// User id and both bounds.
    pub fn parts(self) -> AppResult<(String, DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            self.user_id,
            required(self.start, "start date is required")?,
            required(self.end, "end date is required")?,
        ))
    }
}

impl BindRequest for UserPeriodRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        let mut req: Self = input.json()?;
        req.user_id = input.segment("id", "no user id")?;
        Ok(req)
    }
}

/// A user id from `{id}` plus a lower date bound in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserAfterDateRequest {
    /// User id.
    #[serde(skip)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Inclusive lower bound.
    #[serde(default)]
    #[validate(required(message = "start date is required"))]
    pub start: Option<DateTime<Utc>>,
}

impl UserAfterDateRequest {
    /// User id and the bound.
    pub fn parts(self) -> AppResult<(String, DateTime<Utc>)> {
        Ok((self.user_id, required(self.start, "start date is required")?))
    }
}

impl BindRequest for UserAfterDateRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        let mut req: Self = input.json()?;
        req.user_id = input.segment("id", "no user id")?;
        Ok(req)
    }
}

/// A user id from `{id}` plus an upper date bound in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserBeforeDateRequest {
    /// User id.
    #[serde(skip)]
    #[validate(custom(function = "user_id", message = "not correct user id"))]
    pub user_id: String,
    /// Inclusive upper bound.
    #[serde(default)]
    #[validate(required(message = "end date is required"))]
    pub end: Option<DateTime<Utc>>,
}

impl UserBeforeDateRequest {
    /// User id and the bound.
    pub fn parts(self) -> AppResult<(String, DateTime<Utc>)> {
        Ok((self.user_id, required(self.end, "end date is required")?))
    }
}

impl BindRequest for UserBeforeDateRequest {
    fn bind(input: &RequestInput) -> AppResult<Self> {
        let mut req: Self = input.json()?;
        req.user_id = input.segment("id", "no user id")?;
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use purchase_core::ErrorKind;

    use super::*;
    use crate::extractors::validated::bind_and_validate;

    fn with_id(id: &str, body: &'static str) -> RequestInput {
        RequestInput::new(HashMap::from([("id".to_string(), id.to_string())]), body)
    }

    #[test]
    fn test_id_request() {
        let err = bind_and_validate::<IdRequest>(&with_id("abc", "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.message, "not correct id");

        let err = bind_and_validate::<IdRequest>(&RequestInput::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput);
        assert_eq!(err.message, "no id");
    }

    #[test]
    fn test_user_id_request() {
        let err = bind_and_validate::<UserIdRequest>(&with_id("0", "")).unwrap_err();
        assert_eq!(err.message, "not correct user id");
        assert!(bind_and_validate::<UserIdRequest>(&with_id("17", "")).is_ok());
    }

    #[test]
    fn test_period_missing_bounds() {
        let input = RequestInput::new(HashMap::new(), "{}");
        let err = bind_and_validate::<PeriodRequest>(&input).unwrap_err();
        assert_eq!(err.message, "end date is required");

        let input = RequestInput::new(HashMap::new(), r#"{"end":"2021-01-01T00:00:00Z"}"#);
        let err = bind_and_validate::<PeriodRequest>(&input).unwrap_err();
        assert_eq!(err.message, "start date is required");
    }

    #[test]
    fn test_period_bad_date_is_malformed() {
        let input = RequestInput::new(HashMap::new(), r#"{"start":"yesterday"}"#);
        let err = bind_and_validate::<PeriodRequest>(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput);
    }

    #[test]
    fn test_user_after_date() {
        let input = with_id("42", r#"{"start":"2021-01-01T00:00:00Z"}"#);
        let (user, start) = bind_and_validate::<UserAfterDateRequest>(&input)
            .unwrap()
            .parts()
            .unwrap();
        assert_eq!(user, "42");
        assert_eq!(start.to_rfc3339(), "2021-01-01T00:00:00+00:00");
    }
}
