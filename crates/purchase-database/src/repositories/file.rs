//! File repository contract and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use purchase_core::config::UserIdFormat;
use purchase_core::error::{AppError, ErrorKind};
use purchase_core::result::AppResult;
use purchase_core::types::{DateRange, FileId, UserId};
use purchase_entity::convert::{parse_key, parse_user};
use purchase_entity::file::{File, FileDto};

/// Query surface over the file collection.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a file and return its id.
    async fn create(&self, file: FileDto) -> AppResult<String>;

    /// Replace the file stored under `id` and return the id.
    async fn update(&self, id: &str, file: FileDto) -> AppResult<String>;

    /// Delete a file and return its id.
    async fn delete(&self, id: &str) -> AppResult<String>;

    /// Delete one file of the given author and return the author id.
    async fn delete_by_author_id(&self, author_id: &str) -> AppResult<String>;

    /// Find a file by id.
    async fn find_by_id(&self, id: &str) -> AppResult<FileDto>;

    /// Find files whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<FileDto>>;

    /// Find every file.
    async fn find_all(&self) -> AppResult<Vec<FileDto>>;

    /// Find all files of an author.
    async fn find_by_author_id(&self, author_id: &str) -> AppResult<Vec<FileDto>>;

    /// Find files that are no longer actual.
    async fn find_not_actual(&self) -> AppResult<Vec<FileDto>>;

    /// Find files that are actual.
    async fn find_actual(&self) -> AppResult<Vec<FileDto>>;

    /// Find files added inside `range`.
    async fn find_added_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>>;

    /// Find files updated inside `range`.
    async fn find_updated_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>>;
}

/// Row shape of the `files` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    /// Primary key.
    pub id: FileId,
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
    /// Author, in the deployment's user id format.
    pub author_id: String,
}

impl From<&File> for FileRecord {
    fn from(file: &File) -> Self {
        Self {
            id: file.id,
            name: file.name.clone(),
            description: file.description.clone(),
            size: file.size,
            path: file.path.clone(),
            add_date: file.add_date,
            update_date: file.update_date,
            actual: file.actual,
            author_id: file.author_id.as_str().to_string(),
        }
    }
}

impl From<FileRecord> for File {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            size: record.size,
            path: record.path,
            add_date: record.add_date,
            update_date: record.update_date,
            actual: record.actual,
            author_id: UserId::from_stored(record.author_id),
        }
    }
}

fn to_dtos(records: Vec<FileRecord>) -> Vec<FileDto> {
    records
        .into_iter()
        .map(|r| FileDto::from(File::from(r)))
        .collect()
}

fn store_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Store, message, e)
}

const SELECT_FILES: &str = "SELECT id, name, description, size, path, add_date, update_date, \
                            actual, author_id FROM files";

/// PostgreSQL-backed file repository.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
    user_id_format: UserIdFormat,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool, user_id_format: UserIdFormat) -> Self {
        Self {
            pool,
            user_id_format,
        }
    }

    fn author(&self, raw: &str) -> AppResult<UserId> {
        parse_user(raw, self.user_id_format, "author id")
    }

    async fn select_where(
        &self,
        clause: &str,
        context: &'static str,
    ) -> AppResult<Vec<FileDto>> {
        let sql = format!("{SELECT_FILES} WHERE {clause} ORDER BY seq");
        sqlx::query_as::<_, FileRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map(to_dtos)
            .map_err(store_error(context))
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, file: FileDto) -> AppResult<String> {
        let file = file.into_entity(self.user_id_format)?;
        let record = FileRecord::from(&file);
        let id: FileId = sqlx::query_scalar(
            "INSERT INTO files \
             (id, name, description, size, path, add_date, update_date, actual, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.size)
        .bind(&record.path)
        .bind(record.add_date)
        .bind(record.update_date)
        .bind(record.actual)
        .bind(&record.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error("Failed to insert file"))?;
        Ok(id.to_string())
    }

    async fn update(&self, id: &str, file: FileDto) -> AppResult<String> {
        let id: FileId = parse_key(id, "id")?;
        let file = file.into_entity(self.user_id_format)?;
        let record = FileRecord::from(&file);
        sqlx::query_scalar::<_, FileId>(
            "UPDATE files SET name = $2, description = $3, size = $4, path = $5, \
             add_date = $6, update_date = $7, actual = $8, author_id = $9 \
             WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.size)
        .bind(&record.path)
        .bind(record.add_date)
        .bind(record.update_date)
        .bind(record.actual)
        .bind(&record.author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to update file"))?
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: FileId = parse_key(id, "id")?;
        sqlx::query_scalar::<_, FileId>("DELETE FROM files WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to delete file"))?
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn delete_by_author_id(&self, author_id: &str) -> AppResult<String> {
        let author_id = self.author(author_id)?;
        sqlx::query_scalar::<_, String>(
            "DELETE FROM files WHERE id = \
             (SELECT id FROM files WHERE author_id = $1 ORDER BY seq LIMIT 1) \
             RETURNING author_id",
        )
        .bind(author_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to delete file by author"))?
        .ok_or_else(|| AppError::not_found(format!("No file of author {author_id}")))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<FileDto> {
        let id: FileId = parse_key(id, "id")?;
        let sql = format!("{SELECT_FILES} WHERE id = $1");
        sqlx::query_as::<_, FileRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to find file"))?
            .map(|r| FileDto::from(File::from(r)))
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<FileDto>> {
        let sql = format!("{SELECT_FILES} WHERE name = $1 ORDER BY seq");
        sqlx::query_as::<_, FileRecord>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map(to_dtos)
            .map_err(store_error("Failed to find files by name"))
    }

    async fn find_all(&self) -> AppResult<Vec<FileDto>> {
        self.select_where("TRUE", "Failed to list files").await
    }

    async fn find_by_author_id(&self, author_id: &str) -> AppResult<Vec<FileDto>> {
        let author_id = self.author(author_id)?;
        let sql = format!("{SELECT_FILES} WHERE author_id = $1 ORDER BY seq");
        sqlx::query_as::<_, FileRecord>(&sql)
            .bind(author_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map(to_dtos)
            .map_err(store_error("Failed to find files of author"))
    }

    async fn find_not_actual(&self) -> AppResult<Vec<FileDto>> {
        self.select_where("actual = FALSE", "Failed to find expired files")
            .await
    }

    async fn find_actual(&self) -> AppResult<Vec<FileDto>> {
        self.select_where("actual = TRUE", "Failed to find actual files")
            .await
    }

    async fn find_added_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>> {
        let sql = format!(
            "{SELECT_FILES} WHERE ($1::timestamptz IS NULL OR add_date >= $1) \
             AND ($2::timestamptz IS NULL OR add_date <= $2) ORDER BY seq"
        );
        sqlx::query_as::<_, FileRecord>(&sql)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map(to_dtos)
            .map_err(store_error("Failed to find files by add date"))
    }

    async fn find_updated_by_period(&self, range: DateRange) -> AppResult<Vec<FileDto>> {
        let sql = format!(
            "{SELECT_FILES} WHERE ($1::timestamptz IS NULL OR update_date >= $1) \
             AND ($2::timestamptz IS NULL OR update_date <= $2) ORDER BY seq"
        );
        sqlx::query_as::<_, FileRecord>(&sql)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map(to_dtos)
            .map_err(store_error("Failed to find files by update date"))
    }
}
