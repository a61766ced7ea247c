//! File service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use purchase_core::error::AppError;
use purchase_core::types::DateRange;
use purchase_database::repositories::FileRepository;
use purchase_entity::file::FileDto;

/// Manages the catalog of purchasable files.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<dyn FileRepository>,
}

/// Validated input for creating or replacing a file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileRequest {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Size in bytes.
    pub size: i64,
    /// Storage path.
    pub path: String,
    /// Add date.
    pub add_date: DateTime<Utc>,
    /// Update date.
    pub update_date: DateTime<Utc>,
    /// Published flag.
    pub actual: bool,
    /// Author id.
    pub author_id: String,
}

impl From<FileRequest> for FileDto {
    fn from(req: FileRequest) -> Self {
        Self {
            id: String::new(),
            name: req.name,
            description: req.description,
            size: req.size,
            path: req.path,
            add_date: req.add_date,
            update_date: req.update_date,
            actual: req.actual,
            author_id: req.author_id,
        }
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<dyn FileRepository>) -> Self {
        Self { file_repo }
    }

    /// Creates a file and returns its id.
    pub async fn create(&self, req: FileRequest) -> Result<String, AppError> {
        let id = self
            .file_repo
            .create(req.into())
            .await
            .map_err(|e| e.context("couldn't create file"))?;

        info!(file_id = %id, "File created");
        Ok(id)
    }

    /// Replaces a file and returns its id.
    pub async fn update(&self, id: &str, req: FileRequest) -> Result<String, AppError> {
        let id = self
            .file_repo
            .update(id, req.into())
            .await
            .map_err(|e| e.context("couldn't update file"))?;

        info!(file_id = %id, "File updated");
        Ok(id)
    }

    /// Deletes a file and returns its id.
    pub async fn delete(&self, id: &str) -> Result<String, AppError> {
        let id = self
            .file_repo
            .delete(id)
            .await
            .map_err(|e| e.context("couldn't delete file"))?;

        info!(file_id = %id, "File deleted");
        Ok(id)
    }

    /// Deletes one file of an author and returns the author id.
    pub async fn delete_by_author_id(&self, author_id: &str) -> Result<String, AppError> {
        let author_id = self
            .file_repo
            .delete_by_author_id(author_id)
            .await
            .map_err(|e| e.context("couldn't delete file"))?;

        info!(author_id = %author_id, "File of author deleted");
        Ok(author_id)
    }

    /// Finds a file by id.
    pub async fn find_by_id(&self, id: &str) -> Result<FileDto, AppError> {
        self.file_repo
            .find_by_id(id)
            .await
            .map_err(|e| e.context("couldn't find file"))
    }

    /// Finds files by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_by_name(name)
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds every file.
    pub async fn find_all(&self) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_all()
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds all files of an author.
    pub async fn find_by_author_id(&self, author_id: &str) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_by_author_id(author_id)
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds published files.
    pub async fn find_actual(&self) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_actual()
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds superseded files.
    pub async fn find_not_actual(&self) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_not_actual()
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds files added inside a period.
    pub async fn find_added_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_added_by_period(DateRange::between(start, end))
            .await
            .map_err(|e| e.context("couldn't find files"))
    }

    /// Finds files updated inside a period.
    pub async fn find_updated_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FileDto>, AppError> {
        self.file_repo
            .find_updated_by_period(DateRange::between(start, end))
            .await
            .map_err(|e| e.context("couldn't find files"))
    }
}
