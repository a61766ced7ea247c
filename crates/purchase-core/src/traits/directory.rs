//! Capability trait for asking the external user directory about users.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Answers whether a user currently exists.
///
/// `Ok(false)` means the directory answered and the user is absent.
/// Transport failures, timeouts, and unexpected replies are `Err` with
/// [`ErrorKind::Upstream`](crate::error::ErrorKind::Upstream).
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether `id` refers to an existing user.
    async fn user_exists(&self, id: &UserId) -> AppResult<bool>;
}
