//! File entity and its wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use purchase_core::config::UserIdFormat;
use purchase_core::error::AppError;
use purchase_core::types::{FileId, UserId};

use crate::convert::{parse_or_assign, parse_user};

/// A file offered for purchase.
///
/// `actual` marks the currently published version; it is set by whoever
/// writes the record and never derived from the dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Document key.
    pub id: FileId,
    /// Display name, matched exactly by name lookups.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Size in bytes.
    pub size: i64,
    /// Storage path.
    pub path: String,
    /// When the file was added.
    pub add_date: DateTime<Utc>,
    /// When the file was last updated.
    pub update_date: DateTime<Utc>,
    /// Whether this is the currently valid version.
    pub actual: bool,
    /// Uploading author.
    pub author_id: UserId,
}

/// Wire representation of a [`File`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDto {
    /// Document key; empty before creation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Size in bytes.
    pub size: i64,
    /// Storage path.
    pub path: String,
    /// Add date.
    #[serde(rename = "addDate")]
    pub add_date: DateTime<Utc>,
    /// Update date.
    #[serde(rename = "updateDate")]
    pub update_date: DateTime<Utc>,
    /// Published flag.
    pub actual: bool,
    /// Author id.
    #[serde(rename = "authorID")]
    pub author_id: String,
}

impl FileDto {
    /// Convert to an entity, assigning a fresh key when `id` is empty.
    pub fn into_entity(self, format: UserIdFormat) -> Result<File, AppError> {
        Ok(File {
            id: parse_or_assign(&self.id)?,
            author_id: parse_user(&self.author_id, format, "author id")?,
            name: self.name,
            description: self.description,
            size: self.size,
            path: self.path,
            add_date: self.add_date,
            update_date: self.update_date,
            actual: self.actual,
        })
    }
}

impl From<File> for FileDto {
    fn from(file: File) -> Self {
        Self {
            id: file.id.to_string(),
            name: file.name,
            description: file.description,
            size: file.size,
            path: file.path,
            add_date: file.add_date,
            update_date: file.update_date,
            actual: file.actual,
            author_id: file.author_id.into_string(),
        }
    }
}
