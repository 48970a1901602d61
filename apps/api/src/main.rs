//! Tasklane API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use tasklane_application::SearchIndex;
use tasklane_core::AppError;
use tasklane_infrastructure::{InMemorySearchIndex, connect, run_migrations};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};
use crate::api_services::{StorePorts, build_app_state, build_solr_index};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect(database_url).await?;
            run_migrations(&pool).await?;
            Some(pool)
        }
        None => None,
    };

    if config.migrate_only {
        info!("migrations applied");
        return Ok(());
    }

    let (ports, search_index) = match (config.storage_backend, pool.as_ref()) {
        (StorageBackend::Postgres, Some(pool)) => {
            (StorePorts::postgres(pool), build_solr_index(&config.solr)?)
        }
        (StorageBackend::Postgres, None) => {
            return Err(AppError::Validation("DATABASE_URL is required".to_owned()));
        }
        (StorageBackend::Memory, _) => {
            warn!("using in-memory storage and search index; data is lost on shutdown");
            let search_index: Arc<dyn SearchIndex> = Arc::new(InMemorySearchIndex::new());
            (StorePorts::in_memory()?, search_index)
        }
    };

    let app_state = build_app_state(ports, search_index, config.jwt_secret.as_bytes())?;
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "tasklane-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
