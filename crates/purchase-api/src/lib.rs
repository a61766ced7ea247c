//! # purchase-api
//!
//! HTTP API layer for the purchase service built on Axum.
//!
//! Every endpoint takes its input through [`extractors::Validated`], which
//! binds path segments and the JSON body into a request DTO and validates it
//! before the handler runs. Handlers call one service method and map empty
//! results to 404.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
