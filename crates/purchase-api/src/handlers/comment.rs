//! Comment handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::dto::comment::{
    CommentPeriodRequest, CreateCommentRequest, PurchaseIdRequest, TextRequest,
    UpdateCommentRequest, UserPurchaseRequest,
};
use crate::dto::common::{IdRequest, UserIdRequest};
use crate::error::ApiError;
use crate::extractors::Validated;
use crate::handlers::{id_response, list_response};
use crate::state::AppState;

/// POST /comment/api/
pub async fn create_comment(
    State(state): State<AppState>,
    Validated(req): Validated<CreateCommentRequest>,
) -> Result<Response, ApiError> {
    let id = state.comment_service.create(req.into_command()?).await?;
    Ok(id_response(id))
}

/// PUT /comment/api/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    Validated(req): Validated<UpdateCommentRequest>,
) -> Result<Response, ApiError> {
    let (id, command) = req.into_command()?;
    let id = state.comment_service.update(&id, command).await?;
    Ok(id_response(id))
}

/// DELETE /comment/api/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let id = state.comment_service.delete(&req.id).await?;
    Ok(id_response(id))
}

/// GET /comment/api/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let comment = state.comment_service.find_by_id(&req.id).await?;
    Ok(Json(comment).into_response())
}

/// GET /comment/api/
pub async fn list_comments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let comments = state.comment_service.find_all().await?;
    Ok(list_response(comments))
}

/// GET /comment/user/{id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Validated(req): Validated<UserIdRequest>,
) -> Result<Response, ApiError> {
    let comments = state
        .comment_service
        .find_all_by_user_id(&req.user_id)
        .await?;
    Ok(list_response(comments))
}

/// GET /comment/purchase/{id}
pub async fn list_by_purchase(
    State(state): State<AppState>,
    Validated(req): Validated<PurchaseIdRequest>,
) -> Result<Response, ApiError> {
    let comments = state
        .comment_service
        .find_by_purchase_id(&req.purchase_id)
        .await?;
    Ok(list_response(comments))
}

/// GET /comment/user/{id}/purchase/{purchase_id}
pub async fn list_by_user_and_purchase(
    State(state): State<AppState>,
    Validated(req): Validated<UserPurchaseRequest>,
) -> Result<Response, ApiError> {
    let comments = state
        .comment_service
        .find_by_user_id_and_purchase_id(&req.user_id, &req.purchase_id)
        .await?;
    Ok(list_response(comments))
}

/// POST /comment/text
pub async fn search_by_text(
    State(state): State<AppState>,
    Validated(req): Validated<TextRequest>,
) -> Result<Response, ApiError> {
    let comments = state.comment_service.find_by_text(&req.text).await?;
    Ok(list_response(comments))
}

/// POST /comment/period
pub async fn list_by_period(
    State(state): State<AppState>,
    Validated(req): Validated<CommentPeriodRequest>,
) -> Result<Response, ApiError> {
    let (start, end) = req.bounds()?;
    let comments = state.comment_service.find_by_period(start, end).await?;
    Ok(list_response(comments))
}
