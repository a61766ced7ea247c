//! Repository set selected from configuration.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use purchase_core::config::{AppConfig, StoreProvider, UserIdFormat};
use purchase_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{
    CommentRepository, FileRepository, MemoryStore, PgCommentRepository, PgFileRepository,
    PgPurchaseRepository, PurchaseRepository,
};

/// One repository per collection, all backed by the same store.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Purchase collection.
    pub purchases: Arc<dyn PurchaseRepository>,
    /// Comment collection.
    pub comments: Arc<dyn CommentRepository>,
    /// File collection.
    pub files: Arc<dyn FileRepository>,
}

impl Repositories {
    /// Open the configured store.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let format = config.identity.user_id_format;
        match config.database.provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool.into_pool(), format))
            }
            StoreProvider::Memory => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::memory(format))
            }
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: PgPool, format: UserIdFormat) -> Self {
        Self {
            purchases: Arc::new(PgPurchaseRepository::new(pool.clone(), format)),
            comments: Arc::new(PgCommentRepository::new(pool.clone(), format)),
            files: Arc::new(PgFileRepository::new(pool, format)),
        }
    }

    /// Repositories over one fresh in-memory store.
    pub fn memory(format: UserIdFormat) -> Self {
        let store = Arc::new(MemoryStore::new(format));
        Self {
            purchases: store.clone(),
            comments: store.clone(),
            files: store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_provider() {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        let repos = Repositories::open(&config).await.unwrap();
        assert!(repos.purchases.find_all().await.unwrap().is_empty());
        assert!(repos.files.find_actual().await.unwrap().is_empty());
        assert!(repos.comments.find_all().await.unwrap().is_empty());
    }
}
