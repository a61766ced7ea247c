//! Request DTOs with binding and validation.
//!
//! Each request type implements [`BindRequest`](crate::extractors::BindRequest)
//! to pull its fields out of the path and JSON body, and derives
//! [`validator::Validate`] for field-level rules.

pub mod comment;
pub mod common;
pub mod file;
pub mod purchase;
pub mod rules;

use purchase_core::error::AppError;
use purchase_core::result::AppResult;

/// Unwrap a field that validation already proved present.
pub(crate) fn required<T>(value: Option<T>, message: &'static str) -> AppResult<T> {
    value.ok_or_else(|| AppError::invalid_argument(message))
}
