//! File handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::dto::common::{IdRequest, PeriodRequest};
use crate::dto::file::{AuthorIdRequest, CreateFileRequest, FileNameRequest, UpdateFileRequest};
use crate::error::ApiError;
use crate::extractors::Validated;
use crate::handlers::{id_response, list_response};
use crate::state::AppState;

/// POST /file/api/
pub async fn create_file(
    State(state): State<AppState>,
    Validated(req): Validated<CreateFileRequest>,
) -> Result<Response, ApiError> {
    let id = state.file_service.create(req.into_command()?).await?;
    Ok(id_response(id))
}

/// PUT /file/api/{id}
pub async fn update_file(
    State(state): State<AppState>,
    Validated(req): Validated<UpdateFileRequest>,
) -> Result<Response, ApiError> {
    let (id, command) = req.into_command()?;
    let id = state.file_service.update(&id, command).await?;
    Ok(id_response(id))
}

/// DELETE /file/api/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let id = state.file_service.delete(&req.id).await?;
    Ok(id_response(id))
}

/// GET /file/api/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let file = state.file_service.find_by_id(&req.id).await?;
    Ok(Json(file).into_response())
}

/// GET /file/api/author/{id}
pub async fn list_by_author(
    State(state): State<AppState>,
    Validated(req): Validated<AuthorIdRequest>,
) -> Result<Response, ApiError> {
    let files = state.file_service.find_by_author_id(&req.author_id).await?;
    Ok(list_response(files))
}

/// GET /file/{name}
pub async fn list_by_name(
    State(state): State<AppState>,
    Validated(req): Validated<FileNameRequest>,
) -> Result<Response, ApiError> {
    files_named(&state, &req.name).await
}

/// GET /file/added, the by-name lookup for a file literally named `added`.
pub async fn list_named_added(State(state): State<AppState>) -> Result<Response, ApiError> {
    files_named(&state, "added").await
}

/// GET /file/updated
pub async fn list_named_updated(State(state): State<AppState>) -> Result<Response, ApiError> {
    files_named(&state, "updated").await
}

async fn files_named(state: &AppState, name: &str) -> Result<Response, ApiError> {
    let files = state.file_service.find_by_name(name).await?;
    Ok(list_response(files))
}

/// GET /file/
pub async fn list_files(State(state): State<AppState>) -> Result<Response, ApiError> {
    let files = state.file_service.find_all().await?;
    Ok(list_response(files))
}

/// GET /file/actual/
pub async fn list_actual(State(state): State<AppState>) -> Result<Response, ApiError> {
    let files = state.file_service.find_actual().await?;
    Ok(list_response(files))
}

/// GET /file/expired/
pub async fn list_expired(State(state): State<AppState>) -> Result<Response, ApiError> {
    let files = state.file_service.find_not_actual().await?;
    Ok(list_response(files))
}

/// POST /file/added
pub async fn list_added(
    State(state): State<AppState>,
    Validated(req): Validated<PeriodRequest>,
) -> Result<Response, ApiError> {
    let (start, end) = req.bounds()?;
    let files = state.file_service.find_added_by_period(start, end).await?;
    Ok(list_response(files))
}

/// POST /file/updated
pub async fn list_updated(
    State(state): State<AppState>,
    Validated(req): Validated<PeriodRequest>,
) -> Result<Response, ApiError> {
    let (start, end) = req.bounds()?;
    let files = state.file_service.find_updated_by_period(start, end).await?;
    Ok(list_response(files))
}
