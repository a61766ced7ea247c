//! Custom field rules shared by request DTOs.

use validator::ValidationError;

use purchase_core::types::is_native_id;

/// The value must be a document key the store can parse.
pub fn native_id(value: &str) -> Result<(), ValidationError> {
    if is_native_id(value) {
        Ok(())
    } else {
        Err(ValidationError::new("native_id"))
    }
}

/// A user id is only checked for being present and non-zero.
pub fn user_id(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.chars().all(|c| c == '0') {
        Err(ValidationError::new("user_id"))
    } else {
        Ok(())
    }
}
