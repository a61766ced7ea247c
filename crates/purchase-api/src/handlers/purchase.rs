//! Purchase handlers. All routes sit behind the auth middleware.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::dto::common::{
    AfterDateRequest, BeforeDateRequest, IdRequest, PeriodRequest, UserAfterDateRequest,
    UserBeforeDateRequest, UserIdRequest, UserPeriodRequest,
};
use crate::dto::purchase::{CreatePurchaseRequest, FileIdRequest, UserFileRequest};
use crate::error::ApiError;
use crate::extractors::Validated;
use crate::handlers::{id_response, list_response};
use crate::state::AppState;

/// POST /purchase/api/
pub async fn create_purchase(
    State(state): State<AppState>,
    Validated(req): Validated<CreatePurchaseRequest>,
) -> Result<Response, ApiError> {
    let id = state.purchase_service.create(req.into_command()?).await?;
    Ok(id_response(id))
}

/// DELETE /purchase/api/{id}
pub async fn delete_purchase(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let id = state.purchase_service.delete(&req.id).await?;
    Ok(id_response(id))
}

/// GET /purchase/api/{id}
pub async fn get_purchase(
    State(state): State<AppState>,
    Validated(req): Validated<IdRequest>,
) -> Result<Response, ApiError> {
    let purchase = state.purchase_service.find_by_id(&req.id).await?;
    Ok(Json(purchase).into_response())
}

/// GET /purchase/api/last/user/{id}
pub async fn get_last_by_user(
    State(state): State<AppState>,
    Validated(req): Validated<UserIdRequest>,
) -> Result<Response, ApiError> {
    let purchase = state
        .purchase_service
        .find_last_by_user_id(&req.user_id)
        .await?;
    Ok(Json(purchase).into_response())
}

/// GET /purchase/api/user/{id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Validated(req): Validated<UserIdRequest>,
) -> Result<Response, ApiError> {
    let purchases = state
        .purchase_service
        .find_all_by_user_id(&req.user_id)
        .await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/period/user/{id}
pub async fn list_by_user_and_period(
    State(state): State<AppState>,
    Validated(req): Validated<UserPeriodRequest>,
) -> Result<Response, ApiError> {
    let (user_id, start, end) = req.parts()?;
    let purchases = state
        .purchase_service
        .find_by_user_id_and_period(&user_id, start, end)
        .await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/after/user/{id}
pub async fn list_by_user_after(
    State(state): State<AppState>,
    Validated(req): Validated<UserAfterDateRequest>,
) -> Result<Response, ApiError> {
    let (user_id, start) = req.parts()?;
    let purchases = state
        .purchase_service
        .find_by_user_id_after_date(&user_id, start)
        .await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/before/user/{id}
pub async fn list_by_user_before(
    State(state): State<AppState>,
    Validated(req): Validated<UserBeforeDateRequest>,
) -> Result<Response, ApiError> {
    let (user_id, end) = req.parts()?;
    let purchases = state
        .purchase_service
        .find_by_user_id_before_date(&user_id, end)
        .await?;
    Ok(list_response(purchases))
}

/// GET /purchase/api/user/{id}/file/{file_id}
pub async fn list_by_user_and_file(
    State(state): State<AppState>,
    Validated(req): Validated<UserFileRequest>,
) -> Result<Response, ApiError> {
    let purchases = state
        .purchase_service
        .find_by_user_id_and_file_id(&req.user_id, &req.file_id)
        .await?;
    Ok(list_response(purchases))
}

/// GET /purchase/api/last/
pub async fn get_last(State(state): State<AppState>) -> Result<Response, ApiError> {
    let purchase = state.purchase_service.find_last().await?;
    Ok(Json(purchase).into_response())
}

/// GET /purchase/api/
pub async fn list_purchases(State(state): State<AppState>) -> Result<Response, ApiError> {
    let purchases = state.purchase_service.find_all().await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/period
pub async fn list_by_period(
    State(state): State<AppState>,
    Validated(req): Validated<PeriodRequest>,
) -> Result<Response, ApiError> {
    let (start, end) = req.bounds()?;
    let purchases = state.purchase_service.find_by_period(start, end).await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/after
pub async fn list_after(
    State(state): State<AppState>,
    Validated(req): Validated<AfterDateRequest>,
) -> Result<Response, ApiError> {
    let purchases = state.purchase_service.find_after_date(req.start()?).await?;
    Ok(list_response(purchases))
}

/// POST /purchase/api/before
pub async fn list_before(
    State(state): State<AppState>,
    Validated(req): Validated<BeforeDateRequest>,
) -> Result<Response, ApiError> {
    let purchases = state.purchase_service.find_before_date(req.end()?).await?;
    Ok(list_response(purchases))
}

/// GET /purchase/api/file/{file_id}
pub async fn list_by_file(
    State(state): State<AppState>,
    Validated(req): Validated<FileIdRequest>,
) -> Result<Response, ApiError> {
    let purchases = state
        .purchase_service
        .find_by_file_id(&req.file_id)
        .await?;
    Ok(list_response(purchases))
}
