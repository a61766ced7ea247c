//! HTTP handlers.

pub mod comment;
pub mod file;
pub mod health;
pub mod purchase;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// An id result, or 404 when nothing was written.
pub(crate) fn id_response(id: String) -> Response {
    if id.is_empty() {
        StatusCode::NOT_FOUND.into_response()
    } else {
        Json(id).into_response()
    }
}

/// A collection result, or 404 when it is empty.
pub(crate) fn list_response<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NOT_FOUND.into_response()
    } else {
        Json(items).into_response()
    }
}
