//! Purchase repository contract and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use purchase_core::config::UserIdFormat;
use purchase_core::error::{AppError, ErrorKind};
use purchase_core::result::AppResult;
use purchase_core::types::{DateRange, FileId, PurchaseId, UserId};
use purchase_entity::convert::{parse_key, parse_user};
use purchase_entity::purchase::{Purchase, PurchaseDto};

/// Query surface over the purchase collection.
///
/// Single-item lookups fail with `NotFound` when nothing matches; finders
/// returning many documents yield an empty vector instead, in insertion
/// order.
#[async_trait]
pub trait PurchaseRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a purchase and return its id.
    async fn create(&self, purchase: PurchaseDto) -> AppResult<String>;

    /// Delete a purchase and return its id.
    async fn delete(&self, id: &str) -> AppResult<String>;

    /// Delete one purchase of the given file and return the file id.
    async fn delete_by_file_id(&self, file_id: &str) -> AppResult<String>;

    /// Find a purchase by id.
    async fn find_by_id(&self, id: &str) -> AppResult<PurchaseDto>;

    /// Find the purchase most recently inserted for a user.
    async fn find_last_by_user_id(&self, user_id: &str) -> AppResult<PurchaseDto>;

    /// Find all purchases of a user.
    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<PurchaseDto>>;

    /// Find a user's purchases dated inside `range`.
    async fn find_by_user_id_and_period(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> AppResult<Vec<PurchaseDto>>;

    /// Find a user's purchases dated at or after `start`.
    async fn find_by_user_id_after_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
    ) -> AppResult<Vec<PurchaseDto>> {
        self.find_by_user_id_and_period(user_id, DateRange::after(start))
            .await
    }

    /// Find a user's purchases dated at or before `end`.
    async fn find_by_user_id_before_date(
        &self,
        user_id: &str,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<PurchaseDto>> {
        self.find_by_user_id_and_period(user_id, DateRange::before(end))
            .await
    }

    /// Find a user's purchases of one file.
    async fn find_by_user_id_and_file_id(
        &self,
        user_id: &str,
        file_id: &str,
    ) -> AppResult<Vec<PurchaseDto>>;

    /// Find the most recently inserted purchase.
    async fn find_last(&self) -> AppResult<PurchaseDto>;

    /// Find every purchase.
    async fn find_all(&self) -> AppResult<Vec<PurchaseDto>>;

    /// Find purchases dated inside `range`.
    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<PurchaseDto>>;

    /// Find purchases dated at or after `start`.
    async fn find_after_date(&self, start: DateTime<Utc>) -> AppResult<Vec<PurchaseDto>> {
        self.find_by_period(DateRange::after(start)).await
    }

    /// Find purchases dated at or before `end`.
    async fn find_before_date(&self, end: DateTime<Utc>) -> AppResult<Vec<PurchaseDto>> {
        self.find_by_period(DateRange::before(end)).await
    }

    /// Find all purchases of a file.
    async fn find_by_file_id(&self, file_id: &str) -> AppResult<Vec<PurchaseDto>>;
}

/// Row shape of the `purchases` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PurchaseRecord {
    /// Primary key.
    pub id: PurchaseId,
    /// Buyer, in the deployment's user id format.
    pub user_id: String,
    /// Purchased file.
    pub file_id: FileId,
    /// Purchase date.
    pub date: DateTime<Utc>,
}

impl From<&Purchase> for PurchaseRecord {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: purchase.id,
            user_id: purchase.user_id.as_str().to_string(),
            file_id: purchase.file_id,
            date: purchase.date,
        }
    }
}

impl From<PurchaseRecord> for Purchase {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            id: record.id,
            user_id: UserId::from_stored(record.user_id),
            file_id: record.file_id,
            date: record.date,
        }
    }
}

fn to_dtos(records: Vec<PurchaseRecord>) -> Vec<PurchaseDto> {
    records
        .into_iter()
        .map(|r| PurchaseDto::from(Purchase::from(r)))
        .collect()
}

fn store_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Store, message, e)
}

/// PostgreSQL-backed purchase repository.
#[derive(Debug, Clone)]
pub struct PgPurchaseRepository {
    pool: PgPool,
    user_id_format: UserIdFormat,
}

impl PgPurchaseRepository {
    /// Create a new purchase repository.
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
impl PurchaseRepository for PgPurchaseRepository {
    async fn create(&self, purchase: PurchaseDto) -> AppResult<String> {
        let purchase = purchase.into_entity(self.user_id_format)?;
        let record = PurchaseRecord::from(&purchase);
        let id: PurchaseId = sqlx::query_scalar(
            "INSERT INTO purchases (id, user_id, file_id, date) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(record.file_id)
        .bind(record.date)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error("Failed to insert purchase"))?;
        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let id: PurchaseId = parse_key(id, "id")?;
        sqlx::query_scalar::<_, PurchaseId>("DELETE FROM purchases WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to delete purchase"))?
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::not_found(format!("Purchase {id} not found")))
    }

    async fn delete_by_file_id(&self, file_id: &str) -> AppResult<String> {
        let file_id: FileId = parse_key(file_id, "file id")?;
        sqlx::query_scalar::<_, FileId>(
            "DELETE FROM purchases WHERE id = \
             (SELECT id FROM purchases WHERE file_id = $1 ORDER BY seq LIMIT 1) \
             RETURNING file_id",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to delete purchase by file"))?
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::not_found(format!("No purchase of file {file_id}")))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<PurchaseDto> {
        let id: PurchaseId = parse_key(id, "id")?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to find purchase"))?
        .map(|r| PurchaseDto::from(Purchase::from(r)))
        .ok_or_else(|| AppError::not_found(format!("Purchase {id} not found")))
    }

    async fn find_last_by_user_id(&self, user_id: &str) -> AppResult<PurchaseDto> {
        let user_id = self.user(user_id)?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases \
             WHERE user_id = $1 ORDER BY seq DESC LIMIT 1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to find last purchase of user"))?
        .map(|r| PurchaseDto::from(Purchase::from(r)))
        .ok_or_else(|| AppError::not_found(format!("No purchases of user {user_id}")))
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id)?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases WHERE user_id = $1 ORDER BY seq",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find purchases of user"))
    }

    async fn find_by_user_id_and_period(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id)?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases \
             WHERE user_id = $1 \
             AND ($2::timestamptz IS NULL OR date >= $2) \
             AND ($3::timestamptz IS NULL OR date <= $3) \
             ORDER BY seq",
        )
        .bind(user_id.as_str())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find purchases of user by period"))
    }

    async fn find_by_user_id_and_file_id(
        &self,
        user_id: &str,
        file_id: &str,
    ) -> AppResult<Vec<PurchaseDto>> {
        let user_id = self.user(user_id)?;
        let file_id: FileId = parse_key(file_id, "file id")?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases \
             WHERE user_id = $1 AND file_id = $2 ORDER BY seq",
        )
        .bind(user_id.as_str())
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find purchases of user by file"))
    }

    async fn find_last(&self) -> AppResult<PurchaseDto> {
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases ORDER BY seq DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to find last purchase"))?
        .map(|r| PurchaseDto::from(Purchase::from(r)))
        .ok_or_else(|| AppError::not_found("No purchases"))
    }

    async fn find_all(&self) -> AppResult<Vec<PurchaseDto>> {
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to list purchases"))
    }

    async fn find_by_period(&self, range: DateRange) -> AppResult<Vec<PurchaseDto>> {
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases \
             WHERE ($1::timestamptz IS NULL OR date >= $1) \
             AND ($2::timestamptz IS NULL OR date <= $2) \
             ORDER BY seq",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find purchases by period"))
    }

    async fn find_by_file_id(&self, file_id: &str) -> AppResult<Vec<PurchaseDto>> {
        let file_id: FileId = parse_key(file_id, "file id")?;
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, file_id, date FROM purchases WHERE file_id = $1 ORDER BY seq",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map(to_dtos)
        .map_err(store_error("Failed to find purchases of file"))
    }
}
