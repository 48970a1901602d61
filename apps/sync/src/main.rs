//! Tasklane search index resynchronization job.
//!
//! Re-submits every project and task from the primary store to the search
//! index. Exits non-zero when any enumeration or submission failed.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tasklane_application::SearchSyncService;
use tasklane_core::{AppError, AppResult};
use tasklane_infrastructure::{
    PostgresProjectRepository, PostgresTaskRepository, SolrSearchIndex, connect,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct SyncConfig {
    database_url: String,
    solr_base_url: String,
    solr_core: String,
    search_timeout: Duration,
}

impl SyncConfig {
    fn load() -> AppResult<Self> {
        let database_url = required_env("DATABASE_URL")?;
        let solr_base_url =
            env::var("SOLR_BASE_URL").unwrap_or_else(|_| "http://localhost:8983/solr".to_owned());
        let solr_core = env::var("SOLR_CORE").unwrap_or_else(|_| "todoapp".to_owned());
        let timeout_ms = parse_env_u64("SEARCH_TIMEOUT_MS", 3_000)?;

        if timeout_ms == 0 {
            return Err(AppError::Validation(
                "SEARCH_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            solr_base_url,
            solr_core,
            search_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SyncConfig::load()?;
    let pool = connect(config.database_url.as_str()).await?;
    let search_index = SolrSearchIndex::new(
        config.solr_base_url.as_str(),
        config.solr_core.as_str(),
        config.search_timeout,
    )?;

    let service = SearchSyncService::new(
        Arc::new(PostgresProjectRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(search_index),
    );

    info!(core = %config.solr_core, "search resynchronization started");
    let report = service.resynchronize().await;

    if !report.is_clean() {
        warn!(
            submitted = report.submitted,
            failed = report.failed,
            enumeration_failures = report.enumeration_failures,
            "search resynchronization finished with failures"
        );
        return Err(AppError::Internal(format!(
            "{} document submissions and {} enumerations failed",
            report.failed, report.enumeration_failures
        )));
    }

    info!(
        submitted = report.submitted,
        "search resynchronization finished"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
