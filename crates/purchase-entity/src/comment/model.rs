//! Comment entity and its wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use purchase_core::config::UserIdFormat;
use purchase_core::error::AppError;
use purchase_core::types::{CommentId, PurchaseId, UserId};

use crate::convert::{parse_key, parse_or_assign, parse_user};

/// A user's comment on a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Document key.
    pub id: CommentId,
    /// Author of the comment. Must exist in the user directory when written.
    pub user_id: UserId,
    /// Purchase being commented on. Not checked for existence.
    pub purchase_id: PurchaseId,
    /// When the comment was written.
    pub date: DateTime<Utc>,
    /// Comment body.
    pub text: String,
}

/// Wire representation of a [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    /// Document key; empty before creation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Author id.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Purchase id.
    #[serde(rename = "purchaseID")]
    pub purchase_id: String,
    /// Comment date.
    pub date: DateTime<Utc>,
    /// Comment body.
    pub text: String,
}

impl CommentDto {
    /// Convert to an entity, assigning a fresh key when `id` is empty.
    pub fn into_entity(self, format: UserIdFormat) -> Result<Comment, AppError> {
        Ok(Comment {
            id: parse_or_assign(&self.id)?,
            user_id: parse_user(&self.user_id, format, "user id")?,
            purchase_id: parse_key(&self.purchase_id, "purchase id")?,
            date: self.date,
            text: self.text,
        })
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_id: comment.user_id.into_string(),
            purchase_id: comment.purchase_id.to_string(),
            date: comment.date,
            text: comment.text,
        }
    }
}
