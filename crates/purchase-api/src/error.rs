//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use purchase_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code for the wrapped error kind.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::MalformedInput | ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Store
            | ErrorKind::Conversion
            | ErrorKind::Upstream
            | ErrorKind::Configuration
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            // Misses carry no body.
            StatusCode::NOT_FOUND => return status.into_response(),
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self.0, kind = %self.0.kind, "Internal server error");
            }
            _ => {
                tracing::debug!(error = %self.0.message, status = status.as_u16(), "Request rejected");
            }
        }

        let body = ApiErrorResponse {
            message: self.0.message,
        };
        (status, Json(body)).into_response()
    }
}
