//! `Validated<T>` extractor: bind the request into `T`, then validate it.
//!
//! Binding is structural. A body that is not valid JSON for `T` or a
//! missing path segment fails with `MalformedInput`. Validation is semantic
//! and fails with `InvalidArgument` carrying one sentence. Both end as 400.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use purchase_core::error::AppError;
use purchase_core::result::AppResult;

use crate::error::ApiError;

/// Raw pieces of a request a DTO is bound from.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    path: HashMap<String, String>,
    body: Bytes,
}

impl RequestInput {
    /// Assemble an input from path parameters and a body.
    pub fn new(path: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            path,
            body: body.into(),
        }
    }

    /// Take a path segment, failing with `missing` when it is absent or empty.
    pub fn segment(&self, name: &str, missing: &'static str) -> AppResult<String> {
        match self.path.get(name) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(AppError::malformed(missing)),
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::debug!(error = %e, "Undecodable request body");
            AppError::malformed("invalid request body")
        })
    }
}

/// Builds a request DTO from transport input.
pub trait BindRequest: Sized {
    /// Extract fields from path and body.
    fn bind(input: &RequestInput) -> AppResult<Self>;
}

/// The reason reported for a failed validation.
///
/// Field names are visited in sorted order so the same input always yields
/// the same sentence.
pub fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();

    names
        .first()
        .and_then(|name| fields.get(*name))
        .and_then(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .unwrap_or_else(|| "invalid request".to_string())
}

/// Bind then validate `T` from a request.
pub fn bind_and_validate<T>(input: &RequestInput) -> AppResult<T>
where
    T: BindRequest + Validate,
{
    let value = T::bind(input)?;
    value
        .validate()
        .map_err(|errors| AppError::invalid_argument(first_message(&errors)))?;
    Ok(value)
}

/// A request DTO that bound and validated successfully.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: BindRequest + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let path = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let body = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Unreadable request body");
                AppError::malformed("invalid request body")
            })?;

        let input = RequestInput::new(path, body);
        Ok(Self(bind_and_validate(&input)?))
    }
}
