//! Bearer token middleware for the authenticated route groups.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use purchase_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Subject of the verified token, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject(pub String);

/// Pull the token out of an `Authorization` header value.
fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::unauthorized("empty auth header")),
    };

    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AppError::unauthorized("invalid auth header")),
    }
}

/// Rejects requests without a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    let subject = state.jwt_decoder.verify(token)?;

    tracing::debug!(subject = %subject, "Authenticated request");
    request.extensions_mut().insert(AuthSubject(subject));
    Ok(next.run(request).await)
}
