//! Purchase Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use purchase_api::AppState;
use purchase_core::config::AppConfig;
use purchase_core::error::AppError;
use purchase_database::Repositories;
use purchase_service::HttpUserDirectory;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PURCHASE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting purchase server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Store ────────────────────────────────────────────
    tracing::info!(provider = ?config.database.provider, "Opening store...");
    let repos = Repositories::open(&config).await?;
    tracing::info!("Store ready");

    // ── Step 2: User directory ───────────────────────────────────
    let directory = Arc::new(HttpUserDirectory::new(&config.user_directory)?);
    tracing::info!(
        base_url = %config.user_directory.base_url,
        "User directory client initialized"
    );

    // ── Step 3: Serve ────────────────────────────────────────────
    let state = AppState::new(config, repos, directory);
    purchase_api::app::run_server(state).await
}
