use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tasklane_core::AppError;
use tasklane_infrastructure::MIN_SECRET_BYTES;
use tracing_subscriber::EnvFilter;

/// Where users, projects and tasks are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Validation(format!(
                "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolrConfig {
    pub base_url: String,
    pub core: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub solr: SolrConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_owned())
            .parse::<StorageBackend>()?;
        let database_url = if migrate_only || storage_backend == StorageBackend::Postgres {
            Some(required_non_empty_env("DATABASE_URL")?)
        } else {
            None
        };

        let jwt_secret = required_env("JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match env::var("API_PORT") {
            Ok(value) => parse_port(&value)?,
            Err(_) => 8080,
        };

        let timeout_ms = match env::var("SEARCH_TIMEOUT_MS") {
            Ok(value) => value.trim().parse::<u64>().map_err(|error| {
                AppError::Validation(format!("invalid SEARCH_TIMEOUT_MS: {error}"))
            })?,
            Err(_) => 3_000,
        };
        let solr = SolrConfig {
            base_url: env::var("SOLR_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8983/solr".to_owned()),
            core: env::var("SOLR_CORE").unwrap_or_else(|_| "todoapp".to_owned()),
            timeout: Duration::from_millis(timeout_ms),
        };

        Ok(Self {
            migrate_only,
            storage_backend,
            database_url,
            jwt_secret,
            frontend_url,
            api_host,
            api_port,
            solr,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    match value.trim().parse::<u16>() {
        Ok(0) => Err(AppError::Validation("API_PORT must not be 0".to_owned())),
        Ok(port) => Ok(port),
        Err(error) => Err(AppError::Validation(format!(
            "invalid API_PORT '{value}': {error}"
        ))),
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
