//! Comment service.
//!
//! Every write and every by-user read first asks the user directory whether
//! the referenced user exists. An absent user is not an error: writes
//! return an empty id and reads an empty list, and the repository is never
//! touched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use purchase_core::config::UserIdFormat;
use purchase_core::error::{AppError, ErrorKind};
use purchase_core::traits::UserDirectory;
use purchase_core::types::{DateRange, UserId};
use purchase_database::repositories::CommentRepository;
use purchase_entity::comment::CommentDto;

/// Manages comments and guards them against unknown users.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment repository.
    comment_repo: Arc<dyn CommentRepository>,
    /// External user directory.
    directory: Arc<dyn UserDirectory>,
    /// Accepted user id shape.
    user_id_format: UserIdFormat,
}

/// Validated input for creating or replacing a comment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommentRequest {
    /// Author id.
    pub user_id: String,
    /// Commented purchase id.
    pub purchase_id: String,
    /// Comment date.
    pub date: DateTime<Utc>,
    /// Comment body.
    pub text: String,
}

impl CommentRequest {
    fn into_dto(self) -> CommentDto {
        CommentDto {
            id: String::new(),
            user_id: self.user_id,
            purchase_id: self.purchase_id,
            date: self.date,
            text: self.text,
        }
    }
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        directory: Arc<dyn UserDirectory>,
        user_id_format: UserIdFormat,
    ) -> Self {
        Self {
            comment_repo,
            directory,
            user_id_format,
        }
    }

    /// Ask the directory about `raw`.
    async fn user_exists(&self, raw: &str, context: &'static str) -> Result<bool, AppError> {
        let user_id = UserId::parse(raw, self.user_id_format).map_err(|e| e.context(context))?;
        let exists = self.directory.user_exists(&user_id).await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "couldn't check user existence", e)
        })?;
        if !exists {
            debug!(user_id = %user_id, "User not found in directory");
        }
        Ok(exists)
    }

    /// Creates a comment and returns its id, or an empty id when the
    /// author does not exist.
    pub async fn create(&self, req: CommentRequest) -> Result<String, AppError> {
        if !self.user_exists(&req.user_id, "couldn't create comment").await? {
            return Ok(String::new());
        }

        let id = self
            .comment_repo
            .create(req.into_dto())
            .await
            .map_err(|e| e.context("couldn't create comment"))?;

        info!(comment_id = %id, "Comment created");
        Ok(id)
    }

    /// Replaces a comment and returns its id, or an empty id when the
    /// author does not exist.
    pub async fn update(&self, id: &str, req: CommentRequest) -> Result<String, AppError> {
        if !self.user_exists(&req.user_id, "couldn't update comment").await? {
            return Ok(String::new());
        }

        let mut dto = req.into_dto();
        dto.id = id.to_string();
        let id = self
            .comment_repo
            .update(id, dto)
            .await
            .map_err(|e| e.context("couldn't update comment"))?;

        info!(comment_id = %id, "Comment updated");
        Ok(id)
    }

    /// Deletes a comment and returns its id.
    pub async fn delete(&self, id: &str) -> Result<String, AppError> {
        let id = self
            .comment_repo
            .delete(id)
            .await
            .map_err(|e| e.context("couldn't delete comment"))?;

        info!(comment_id = %id, "Comment deleted");
        Ok(id)
    }

    /// Deletes one comment on a purchase and returns the purchase id.
    pub async fn delete_by_purchase_id(&self, purchase_id: &str) -> Result<String, AppError> {
        let purchase_id = self
            .comment_repo
            .delete_by_purchase_id(purchase_id)
            .await
            .map_err(|e| e.context("couldn't delete comment"))?;

        info!(purchase_id = %purchase_id, "Comment on purchase deleted");
        Ok(purchase_id)
    }

    /// Finds a comment by id.
    pub async fn find_by_id(&self, id: &str) -> Result<CommentDto, AppError> {
        self.comment_repo
            .find_by_id(id)
            .await
            .map_err(|e| e.context("couldn't find comment"))
    }

    /// Finds all comments of a user, or nothing when the user does not exist.
    pub async fn find_all_by_user_id(&self, user_id: &str) -> Result<Vec<CommentDto>, AppError> {
        if !self.user_exists(user_id, "couldn't find comments").await? {
            return Ok(Vec::new());
        }

        self.comment_repo
            .find_all_by_user_id(user_id)
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }

    /// Finds all comments on a purchase.
    pub async fn find_by_purchase_id(&self, purchase_id: &str) -> Result<Vec<CommentDto>, AppError> {
        self.comment_repo
            .find_by_purchase_id(purchase_id)
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }

    /// Finds a user's comments on one purchase, or nothing when the user
    /// does not exist.
    pub async fn find_by_user_id_and_purchase_id(
        &self,
        user_id: &str,
        purchase_id: &str,
    ) -> Result<Vec<CommentDto>, AppError> {
        if !self.user_exists(user_id, "couldn't find comments").await? {
            return Ok(Vec::new());
        }

        self.comment_repo
            .find_by_user_id_and_purchase_id(user_id, purchase_id)
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }

    /// Finds every comment.
    pub async fn find_all(&self) -> Result<Vec<CommentDto>, AppError> {
        self.comment_repo
            .find_all()
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }

    /// Finds comments whose text matches a regular expression.
    pub async fn find_by_text(&self, pattern: &str) -> Result<Vec<CommentDto>, AppError> {
        self.comment_repo
            .find_by_text(pattern)
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }

    /// Finds comments dated inside a period.
    pub async fn find_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CommentDto>, AppError> {
        self.comment_repo
            .find_by_period(DateRange::between(start, end))
            .await
            .map_err(|e| e.context("couldn't find comments"))
    }
}
