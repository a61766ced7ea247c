//! Purchase entity and its wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use purchase_core::config::UserIdFormat;
use purchase_core::error::AppError;
use purchase_core::types::{FileId, PurchaseId, UserId};

use crate::convert::{parse_key, parse_or_assign, parse_user};

/// A user's purchase of a file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Document key.
    pub id: PurchaseId,
    /// Buyer.
    pub user_id: UserId,
    /// Purchased file.
    pub file_id: FileId,
    /// When the purchase happened.
    pub date: DateTime<Utc>,
}

/// Wire representation of a [`Purchase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDto {
    /// Document key; empty before creation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Buyer id.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Purchase date.
    pub date: DateTime<Utc>,
    /// Purchased file id.
    #[serde(rename = "fileID")]
    pub file_id: String,
}

impl PurchaseDto {
    /// Convert to an entity, assigning a fresh key when `id` is empty.
    pub fn into_entity(self, format: UserIdFormat) -> Result<Purchase, AppError> {
        Ok(Purchase {
            id: parse_or_assign(&self.id)?,
            user_id: parse_user(&self.user_id, format, "user id")?,
            file_id: parse_key(&self.file_id, "file id")?,
            date: self.date,
        })
    }
}

impl From<Purchase> for PurchaseDto {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id.to_string(),
            user_id: purchase.user_id.into_string(),
            date: purchase.date,
            file_id: purchase.file_id.to_string(),
        }
    }
}
