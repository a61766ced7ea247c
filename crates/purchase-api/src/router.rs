//! Route definitions for the purchase HTTP API.
//!
//! Routes are grouped per resource. Each group is split into public routes
//! and authenticated routes; the latter carry the bearer token middleware as
//! a route layer so unmatched paths still answer 404 rather than 401.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let authenticated = Router::new()
        .merge(purchase_routes())
        .merge(comment_api_routes())
        .merge(file_api_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(authenticated)
        .merge(comment_public_routes())
        .merge(file_public_routes())
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

/// Purchase endpoints, all authenticated.
fn purchase_routes() -> Router<AppState> {
    use handlers::purchase::*;

    Router::new()
        .route("/purchase/api/", get(list_purchases).post(create_purchase))
        .route("/purchase/api/{id}", get(get_purchase).delete(delete_purchase))
        .route("/purchase/api/last/", get(get_last))
        .route("/purchase/api/last/user/{id}", get(get_last_by_user))
        .route("/purchase/api/user/{id}", get(list_by_user))
        .route(
            "/purchase/api/user/{id}/file/{file_id}",
            get(list_by_user_and_file),
        )
        .route("/purchase/api/file/{file_id}", get(list_by_file))
        .route("/purchase/api/period", post(list_by_period))
        .route("/purchase/api/after", post(list_after))
        .route("/purchase/api/before", post(list_before))
        .route("/purchase/api/period/user/{id}", post(list_by_user_and_period))
        .route("/purchase/api/after/user/{id}", post(list_by_user_after))
        .route("/purchase/api/before/user/{id}", post(list_by_user_before))
}

/// Comment reads open to anyone.
fn comment_public_routes() -> Router<AppState> {
    use handlers::comment::*;

    Router::new()
        .route("/comment/user/{id}", get(list_by_user))
        .route("/comment/purchase/{id}", get(list_by_purchase))
        .route(
            "/comment/user/{id}/purchase/{purchase_id}",
            get(list_by_user_and_purchase),
        )
        .route("/comment/text", post(search_by_text))
        .route("/comment/period", post(list_by_period))
}

/// Comment writes and direct reads.
fn comment_api_routes() -> Router<AppState> {
    use handlers::comment::*;

    Router::new()
        .route("/comment/api/", get(list_comments).post(create_comment))
        .route(
            "/comment/api/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

/// File catalog reads open to anyone.
fn file_public_routes() -> Router<AppState> {
    use handlers::file::*;

    Router::new()
        .route("/file/", get(list_files))
        .route("/file/{name}", get(list_by_name))
        .route("/file/actual/", get(list_actual))
        .route("/file/expired/", get(list_expired))
        // Static POST paths shadow `{name}`; keep GET on them a name lookup.
        .route("/file/added", get(list_named_added).post(list_added))
        .route("/file/updated", get(list_named_updated).post(list_updated))
}

/// File writes and direct reads.
fn file_api_routes() -> Router<AppState> {
    use handlers::file::*;

    Router::new()
        .route("/file/api/", post(create_file))
        .route(
            "/file/api/{id}",
            get(get_file).put(update_file).delete(delete_file),
        )
        .route("/file/api/author/{id}", get(list_by_author))
}
