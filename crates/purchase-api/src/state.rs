//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use purchase_auth::JwtDecoder;
use purchase_core::config::AppConfig;
use purchase_core::traits::UserDirectory;
use purchase_database::Repositories;
use purchase_service::{CommentService, FileService, PurchaseService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Purchase service
    pub purchase_service: Arc<PurchaseService>,
    /// Comment service
    pub comment_service: Arc<CommentService>,
    /// File service
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wire services over the given repositories and user directory.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let purchase_service = Arc::new(PurchaseService::new(repos.purchases));
        let comment_service = Arc::new(CommentService::new(
            repos.comments,
            directory,
            config.identity.user_id_format,
        ));
        let file_service = Arc::new(FileService::new(repos.files));

        Self {
            config: Arc::new(config),
            jwt_decoder,
            purchase_service,
            comment_service,
            file_service,
        }
    }
}
