//! Process-local repositories.
//!
//! Each collection is a vector kept in insertion order behind an async
//! `RwLock`, so "last" is simply the tail and many-finders come back in
//! the order documents were written. Updates replace a document in place
//! and keep its position.

use async_trait::async_trait;
use tokio::sync::RwLock;

use purchase_core::config::UserIdFormat;
use purchase_core::error::AppError;
use purchase_core::result::AppResult;
use purchase_core::types::{CommentId, DateRange, FileId, PurchaseId, UserId};
use purchase_entity::comment::{Comment, CommentDto};
use purchase_entity::convert::{parse_key, parse_user};
use purchase_entity::file::{File, FileDto};
use purchase_entity::purchase::{Purchase, PurchaseDto};

use super::comment::{CommentRepository, text_pattern};
use super::file::FileRepository;
use super::purchase::PurchaseRepository;

/// In-memory store implementing every repository contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user_id_format: UserIdFormat,
    purchases: RwLock<Vec<Purchase>>,
    comments: RwLock<Vec<Comment>>,
    files: RwLock<Vec<File>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(user_id_format: UserIdFormat) -> Self {
        Self {
            user_id_format,
            ..Self::default()
        }
    }

    fn user(&self, raw: &str, what: &str) -> AppResult<UserId> {
        parse_user(raw, self.user_id_format, what)
    }
}

fn duplicate(id: impl std::fmt::Display) -> AppError {
    AppError::store(format!("duplicate key {id}"))
}

fn collect<T: Clone, D: From<T>>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<D> {
    items
        .iter()
        .filter(|item| keep(*item))
        .cloned()
        .map(D::from)
        .collect()
}

#[async_trait]
impl PurchaseRepository for MemoryStore {
    async fn create(&self, purchase: PurchaseDto) -> AppResult<String> {
        let purchase = purchase.into_entity(self.user_id_format)?;
        let mut purchases = self.purchases.write().await;
        if purchases.iter().any(|p| p.id == purchase.id) {
            return Err(duplicate(purchase.id));
        }
        let id = purchase.id.to_string();
        purchases.push(purchase);
        Ok(id)
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: PurchaseId = parse_key(id, "id")?;
        let mut purchases = self.purchases.write().await;
        let position = purchases
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Purchase {id} not found")))?;
        Ok(purchases.remove(position).id.to_string())
    }

    async fn delete_by_file_id(&self, file_id: &str) -> AppResult<String> {
        let file_id: FileId = parse_key(file_id, "file id")?;
        let mut purchases = self.purchases.write().await;
        let position = purchases
            .iter()
            .position(|p| p.file_id == file_id)
            .ok_or_else(|| AppError::not_found(format!("No purchase of file {file_id}")))?;
        Ok(purchases.remove(position).file_id.to_string())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<PurchaseDto> {
        let id: PurchaseId = parse_key(id, "id")?;
        self.purchases
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map(PurchaseDto::from)
            .ok_or_else(|| AppError::not_found(format!("Purchase {id} not found")))
    }

    async fn find_last_by_user_id(&self, user_id: &str) -> AppResult<PurchaseDto> {
        let user_id = self.user(user_id, "user id")?;
        self.purchases
            .read()
            .await
            .iter()
            .rev()
            .find(|p| p.user_id == user_id)
            .cloned()
            .map(PurchaseDto::from)
            .ok_or_else(|| AppError::not_found(format!("No purchases of user {user_id}")))
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id, "user id")?;
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |p| p.user_id == user_id))
    }

    async fn find_by_user_id_and_period(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id, "user id")?;
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |p| {
            p.user_id == user_id && range.contains(&p.date)
        }))
    }

    async fn find_by_user_id_and_file_id(
        &self,
        user_id: &str,
        file_id: &str,
    ) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id, "user id")?;
        let file_id: FileId = parse_key(file_id, "file id")?;
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |p| {
            p.user_id == user_id && p.file_id == file_id
        }))
    }

    async fn find_last(&self) -> AppResult<PurchaseDto> {
        self.purchases
            .read()
            .await
            .last()
            .cloned()
            .map(PurchaseDto::from)
            .ok_or_else(|| AppError::not_found("No purchases"))
    }

    async fn find_all(&self) -> AppResult<Vec<PurchaseDto>> {
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |_| true))
    }

    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<PurchaseDto>> {
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |p| range.contains(&p.date)))
    }

    async fn find_by_file_id(&self, file_id: &str) -> AppResult<Vec<PurchaseDto>> {
        let file_id: FileId = parse_key(file_id, "file id")?;
        let purchases = self.purchases.read().await;
        Ok(collect(purchases.as_slice(), |p| p.file_id == file_id))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: CommentDto) -> AppResult<String> {
        let comment = comment.into_entity(self.user_id_format)?;
        let mut comments = self.comments.write().await;
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(duplicate(comment.id));
        }
        let id = comment.id.to_string();
        comments.push(comment);
        Ok(id)
    }

    async fn update(&self, id: &str, comment: CommentDto) -> AppResult<String> {
        let id: CommentId = parse_key(id, "id")?;
        let mut comment = comment.into_entity(self.user_id_format)?;
        comment.id = id;
        let mut comments = self.comments.write().await;
        let slot = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))?;
        *slot = comment;
        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: CommentId = parse_key(id, "id")?;
        let mut comments = self.comments.write().await;
        let position = comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))?;
        Ok(comments.remove(position).id.to_string())
    }

    async fn delete_by_purchase_id(&self, purchase_id: &str) -> AppResult<String> {
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        let mut comments = self.comments.write().await;
        let position = comments
            .iter()
            .position(|c| c.purchase_id == purchase_id)
            .ok_or_else(|| {
                AppError::not_found(format!("No comment on purchase {purchase_id}"))
            })?;
        Ok(comments.remove(position).purchase_id.to_string())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<CommentDto> {
        let id: CommentId = parse_key(id, "id")?;
        self.comments
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(CommentDto::from)
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<CommentDto>> {
        let user_id = self.user(user_id, "user id")?;
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |c| c.user_id == user_id))
    }

    async fn find_by_purchase_id(&self, purchase_id: &str) -> AppResult<Vec<CommentDto>> {
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |c| c.purchase_id == purchase_id))
    }

    async fn find_by_user_id_and_purchase_id(
        &self,
        user_id: &str,
        purchase_id: &str,
    ) -> AppResult<Vec<CommentDto>> {
        let user_id = self.user(user_id, "user id")?;
        let purchase_id: PurchaseId = parse_key(purchase_id, "purchase id")?;
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |c| {
            c.user_id == user_id && c.purchase_id == purchase_id
        }))
    }

    async fn find_all(&self) -> AppResult<Vec<CommentDto>> {
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |_| true))
    }

    async fn find_by_text(&self, pattern: &str) -> AppResult<Vec<CommentDto>> {
        let regex = text_pattern(pattern)?;
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |c| regex.is_match(&c.text)))
    }

    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<CommentDto>> {
        let comments = self.comments.read().await;
        Ok(collect(comments.as_slice(), |c| range.contains(&c.date)))
    }
}

#[async_trait]
impl FileRepository for MemoryStore {
    async fn create(&self, file: FileDto) -> AppResult<String> {
        let file = file.into_entity(self.user_id_format)?;
        let mut files = self.files.write().await;
        if files.iter().any(|f| f.id == file.id) {
            return Err(duplicate(file.id));
        }
        let id = file.id.to_string();
        files.push(file);
        Ok(id)
    }

    async fn update(&self, id: &str, file: FileDto) -> AppResult<String> {
        let id: FileId = parse_key(id, "id")?;
        let mut file = file.into_entity(self.user_id_format)?;
        file.id = id;
        let mut files = self.files.write().await;
        let slot = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        *slot = file;
        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: FileId = parse_key(id, "id")?;
        let mut files = self.files.write().await;
        let position = files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        Ok(files.remove(position).id.to_string())
    }

    async fn delete_by_author_id(&self, author_id: &str) -> AppResult<String> {
        let author_id = self.user(author_id, "author id")?;
        let mut files = self.files.write().await;
        let position = files
            .iter()
            .position(|f| f.author_id == author_id)
            .ok_or_else(|| AppError::not_found(format!("No file of author {author_id}")))?;
        Ok(files.remove(position).author_id.into_string())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<FileDto> {
        let id: FileId = parse_key(id, "id")?;
        self.files
            .read()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .map(FileDto::from)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| f.name == name))
    }

    async fn find_all(&self) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |_| true))
    }

    async fn find_by_author_id(&self, author_id: &str) -> AppResult<Vec<FileDto>> {
        let author_id = self.user(author_id, "author id")?;
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| f.author_id == author_id))
    }

    async fn find_not_actual(&self) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| !f.actual))
    }

    async fn find_actual(&self) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| f.actual))
    }

    async fn find_added_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| range.contains(&f.add_date)))
    }

    async fn find_updated_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>> {
        let files = self.files.read().await;
        Ok(collect(files.as_slice(), |f| range.contains(&f.update_date)))
    }
}
