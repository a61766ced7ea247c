//! Purchase service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use purchase_core::error::AppError;
use purchase_core::types::DateRange;
use purchase_database::repositories::PurchaseRepository;
use purchase_entity::purchase::PurchaseDto;

/// Records purchases and answers purchase queries.
#[derive(Debug, Clone)]
pub struct PurchaseService {
    /// Purchase repository.
    purchase_repo: Arc<dyn PurchaseRepository>,
}

/// Validated input for recording a purchase.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreatePurchaseRequest {
    /// Buyer id.
    pub user_id: String,
    /// Purchase date.
    pub date: DateTime<Utc>,
    /// Purchased file id.
    pub file_id: String,
}

impl PurchaseService {
    /// Creates a new purchase service.
    pub fn new(purchase_repo: Arc<dyn PurchaseRepository>) -> Self {
        Self { purchase_repo }
    }

    /// Records a purchase and returns its id.
    pub async fn create(&self, req: CreatePurchaseRequest) -> Result<String, AppError> {
        let dto = PurchaseDto {
            id: String::new(),
            user_id: req.user_id,
            date: req.date,
            file_id: req.file_id,
        };
        let id = self
            .purchase_repo
            .create(dto)
            .await
            .map_err(|e| e.context("couldn't create purchase"))?;

        info!(purchase_id = %id, "Purchase created");
        Ok(id)
    }

    /// Deletes a purchase and returns its id.
    pub async fn delete(&self, id: &str) -> Result<String, AppError> {
        let id = self
            .purchase_repo
            .delete(id)
            .await
            .map_err(|e| e.context("couldn't delete purchase"))?;

        info!(purchase_id = %id, "Purchase deleted");
        Ok(id)
    }

    /// Deletes one purchase of a file and returns the file id.
    ///
    /// Never called as a side effect of deleting a file.
    pub async fn delete_by_file_id(&self, file_id: &str) -> Result<String, AppError> {
        let file_id = self
            .purchase_repo
            .delete_by_file_id(file_id)
            .await
            .map_err(|e| e.context("couldn't delete purchase"))?;

        info!(file_id = %file_id, "Purchase of file deleted");
        Ok(file_id)
    }

    /// Finds a purchase by id.
    pub async fn find_by_id(&self, id: &str) -> Result<PurchaseDto, AppError> {
        self.purchase_repo
            .find_by_id(id)
            .await
            .map_err(|e| e.context("couldn't find purchase"))
    }

    /// Finds the purchase most recently recorded for a user.
    pub async fn find_last_by_user_id(&self, user_id: &str) -> Result<PurchaseDto, AppError> {
        self.purchase_repo
            .find_last_by_user_id(user_id)
            .await
            .map_err(|e| e.context("couldn't find purchase"))
    }

    /// Finds all purchases of a user.
    pub async fn find_all_by_user_id(&self, user_id: &str) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_all_by_user_id(user_id)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds a user's purchases inside a period.
    pub async fn find_by_user_id_and_period(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_user_id_and_period(user_id, DateRange::between(start, end))
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds a user's purchases at or after a date.
    pub async fn find_by_user_id_after_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
    ) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_user_id_after_date(user_id, start)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds a user's purchases at or before a date.
    pub async fn find_by_user_id_before_date(
        &self,
        user_id: &str,
        end: DateTime<Utc>,
    ) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_user_id_before_date(user_id, end)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds a user's purchases of one file.
    pub async fn find_by_user_id_and_file_id(
        &self,
        user_id: &str,
        file_id: &str,
    ) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_user_id_and_file_id(user_id, file_id)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds the most recently recorded purchase.
    pub async fn find_last(&self) -> Result<PurchaseDto, AppError> {
        self.purchase_repo
            .find_last()
            .await
            .map_err(|e| e.context("couldn't find purchase"))
    }

    /// Finds every purchase.
    pub async fn find_all(&self) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_all()
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds purchases inside a period.
    pub async fn find_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_period(DateRange::between(start, end))
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds purchases at or after a date.
    pub async fn find_after_date(&self, start: DateTime<Utc>) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_after_date(start)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds purchases at or before a date.
    pub async fn find_before_date(&self, end: DateTime<Utc>) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_before_date(end)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }

    /// Finds all purchases of a file.
    pub async fn find_by_file_id(&self, file_id: &str) -> Result<Vec<PurchaseDto>, AppError> {
        self.purchase_repo
            .find_by_file_id(file_id)
            .await
            .map_err(|e| e.context("couldn't find purchases"))
    }
}
