//! Comment repository contract and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use sqlx::PgPool;

use purchase_core::config::UserIdFormat;
use purchase_core::error::{AppError, ErrorKind};
use purchase_core::result::AppResult;
use purchase_core::types::{CommentId, DateRange, PurchaseId, UserId};
use purchase_entity::comment::{Comment, CommentDto};
use purchase_entity::convert::{parse_key, parse_user};

/// Query surface over the comment collection.
#[async_trait]
pub trait CommentRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a comment and return its id.
    async fn create(&self, comment: CommentDto) -> AppResult<String>;

    /// Replace the comment stored under `id` and return the id.
    async fn update(&self, id: &str, comment: CommentDto) -> AppResult<String>;

    /// Delete a comment and return its id.
    async fn delete(&self, id: &str) -> AppResult<String>;

    /// Delete one comment on the given purchase and return the purchase id.
    async fn delete_by_purchase_id(&self, purchase_id: &str) -> AppResult<String>;

    /// Find a comment by id.
    async fn find_by_id(&self, id: &str) -> AppResult<CommentDto>;

    /// Find all comments written by a user.
    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<CommentDto>>;

    /// Find all comments on a purchase.
    async fn find_by_purchase_id(&self, purchase_id: &str) -> AppResult<Vec<CommentDto>>;

    /// Find a user's comments on one purchase.
    async fn find_by_user_id_and_purchase_id(
        &self,
        user_id: &str,
        purchase_id: &str,
    ) -> AppResult<Vec<CommentDto>>;

    /// Find every comment.
    async fn find_all(&self) -> AppResult<Vec<CommentDto>>;

    /// Find comments whose text matches the regular expression `pattern`.
    ///
    /// A pattern [`text_pattern`] rejects fails with `Store` in every store.
    /// Plain literals, anchors, classes, repetition and alternation match
    /// alike everywhere. Syntax whose meaning differs between the `regex`
    /// crate and PostgreSQL's `~` (`\b`, `\B`, `\A`, `\z`, named groups)
    /// may match differently or fail only on PostgreSQL.
    async fn find_by_text(&self, pattern: &str) -> AppResult<Vec<CommentDto>>;

    /// Find comments dated inside `range`.
    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<CommentDto>>;
}

/// Compile a text search pattern, the syntax gate shared by all stores.
pub fn text_pattern(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        AppError::with_source(ErrorKind::Store, "Failed to find comments by text", e)
    })
}

/// Row shape of the `comments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    /// Primary key.
    pub id: CommentId,
    /// Author, in the deployment's user id format.
    pub user_id: String,
    /// Commented purchase.
    pub purchase_id: PurchaseId,
    /// Comment date.
    pub date: DateTime<Utc>,
    /// Comment body.
    pub text: String,
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id.as_str().to_string(),
            purchase_id: comment.purchase_id,
            date: comment.date,
            text: comment.text.clone(),
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            user_id: UserId::from_stored(record.user_id),
            purchase_id: record.purchase_id,
            date: record.date,
            text: record.text,
        }
    }
}

fn to_dtos(records: Vec<CommentRecord>) -> Vec<CommentDto> {
    records
        .into_iter()
        .map(|r| CommentDto::from(Comment::from(r)))
        .collect()
}

fn store_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Store, message, e)
}

/// PostgreSQL-backed comment repository.
#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
    user_id_format: UserIdFormat,
}

impl PgCommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool, user_id_format: UserIdFormat) -> Self {
        Self {
            pool,
            user_id_format,
        }
    }

    fn user(&self, raw: &str) -> AppResult<UserId> {
        parse_user(raw, self.user_id_format, "user id")
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: CommentDto) -> AppResult<String> {
        let comment = comment.into_entity(self.user_id_format)?;
        let record = CommentRecord::from(&comment);
        let id: CommentId = sqlx::query_scalar(
            "INSERT INTO comments (id, user_id, purchase_id, date, text) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(record.purchase_id)
        .bind(record.date)
        .bind(&record.text)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error("Failed to insert comment"))?;
        Ok(id.to_string())
    }

    async fn update(&self, id: &str, comment: CommentDto) -> AppResult<String> {
        let id: CommentId = parse_key(id, "id")?;
        let comment = comment.into_entity(self.user_id_format)?;
        let record = CommentRecord::from(&comment);
        sqlx::query_scalar::<_, CommentId>(
            "UPDATE comments SET user_id = $2, purchase_id = $3, date = $4, text = $5 \
             WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(&record.user_id)
        .bind(record.purchase_id)
        .bind(record.date)
        .bind(&record.text)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to update comment"))?
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: CommentId = parse_key(id, "id")?;
        sqlx::query_scalar::<_, CommentId>("DELETE FROM comments WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to delete comment"))?
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    async fn delete_by_purchase_id(&self, purchase_id: &str) -> AppResult<String> {
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        sqlx::query_scalar::<_, PurchaseId>(
            "DELETE FROM comments WHERE id = \
             (SELECT id FROM comments WHERE purchase_id = $1 ORDER BY seq LIMIT 1) \
             RETURNING purchase_id",
        )
        .bind(purchase_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to delete comment by purchase"))?
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::not_found(format!("No comment on purchase {purchase_id}")))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<CommentDto> {
        let id: CommentId = parse_key(id, "id")?;
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to find comment"))?
        .map(|r| CommentDto::from(Comment::from(r)))
        .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<CommentDto>> {
        let user_id = self.user(user_id)?;
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments \
             WHERE user_id = $1 ORDER BY seq",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find comments of user"))
    }

    async fn find_by_purchase_id(&self, purchase_id: &str) -> AppResult<Vec<CommentDto>> {
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments \
             WHERE purchase_id = $1 ORDER BY seq",
        )
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find comments of purchase"))
    }

    async fn find_by_user_id_and_purchase_id(
        &self,
        user_id: &str,
        purchase_id: &str,
    ) -> AppResult<Vec<CommentDto>> {
        let user_id = self.user(user_id)?;
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments \
             WHERE user_id = $1 AND purchase_id = $2 ORDER BY seq",
        )
        .bind(user_id.as_str())
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find comments of user on purchase"))
    }

    async fn find_all(&self) -> AppResult<Vec<CommentDto>> {
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to list comments"))
    }

    async fn find_by_text(&self, pattern: &str) -> AppResult<Vec<CommentDto>> {
        text_pattern(pattern)?;
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments \
             WHERE text ~ $1 ORDER BY seq",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find comments by text"))
    }

    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<CommentDto>> {
        sqlx::query_as::<_, CommentRecord>(
            "SELECT id, user_id, purchase_id, date, text FROM comments \
             WHERE ($1::timestamptz IS NULL OR date >= $1) \
             AND ($2::timestamptz IS NULL OR date <= $2) \
             ORDER BY seq",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find comments by period"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_pattern() {
        assert!(text_pattern("some").unwrap().is_match("awesome"));
        assert!(text_pattern("^(bug|fix) [a-z]+$").unwrap().is_match("fix typo"));
        for bad in ["(unclosed", "[a-", "a{2,1}"] {
            assert_eq!(text_pattern(bad).unwrap_err().kind, ErrorKind::Store);
        }
    }
}
