//! Shared helpers for DTO to entity conversion.

use std::str::FromStr;

use purchase_core::config::UserIdFormat;
use purchase_core::error::AppError;
use purchase_core::types::UserId;

/// Parse a document key, failing with `invalid <what>`.
pub fn parse_key<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse::<T>()
        .map_err(|_| AppError::conversion(format!("invalid {what}")))
}

/// Parse a document key, or mint a fresh one when the DTO carries none.
pub fn parse_or_assign<T: FromStr + Default>(raw: &str) -> Result<T, AppError> {
    if raw.is_empty() {
        Ok(T::default())
    } else {
        parse_key(raw, "id")
    }
}

/// Parse a foreign user reference, failing with `invalid <what>`.
pub fn parse_user(raw: &str, format: UserIdFormat, what: &str) -> Result<UserId, AppError> {
    UserId::parse(raw, format).map_err(|e| e.context(format!("invalid {what}")))
}
