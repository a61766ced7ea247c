//! JWT claims carried by bearer tokens.

use serde::{Deserialize, Serialize};

/// Registered claims used by this service. Only `sub` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the calling user's id.
    pub sub: String,
    /// Issued at (unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (unix timestamp). Tokens without it never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}
