//! Foreign identity configuration.

use serde::{Deserialize, Serialize};

/// Shape of user and author ids accepted by this deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserIdFormat {
    /// Canonical UUID strings.
    #[default]
    Uuid,
    /// Positive decimal integers.
    Numeric,
    /// Any non-empty string.
    Opaque,
}

/// Foreign identity settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Format enforced when user ids cross into the store.
    #[serde(default)]
    pub user_id_format: UserIdFormat,
}
