//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_repositories;
mod in_memory_search_index;
mod jwt_token_codec;
mod postgres_comment_repository;
mod postgres_errors;
mod postgres_notification_repository;
mod postgres_project_member_repository;
mod postgres_project_repository;
mod postgres_subtask_repository;
mod postgres_task_repository;
mod postgres_user_repository;
mod solr_search_index;
mod system_clock;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_repositories::{
    InMemoryCommentRepository, InMemoryNotificationRepository, InMemoryProjectMemberRepository,
    InMemoryProjectRepository, InMemoryRoleRepository, InMemoryStore, InMemorySubtaskRepository,
    InMemoryTaskRepository, InMemoryUserRepository,
};
pub use in_memory_search_index::InMemorySearchIndex;
pub use jwt_token_codec::{JwtTokenCodec, MIN_SECRET_BYTES};
pub use postgres_comment_repository::PostgresCommentRepository;
pub use postgres_notification_repository::PostgresNotificationRepository;
pub use postgres_project_member_repository::PostgresProjectMemberRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_subtask_repository::PostgresSubtaskRepository;
pub use postgres_task_repository::PostgresTaskRepository;
pub use postgres_user_repository::{PostgresRoleRepository, PostgresUserRepository};
pub use solr_search_index::SolrSearchIndex;
pub use system_clock::SystemClock;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tasklane_core::{AppError, AppResult};

/// Opens a PostgreSQL connection pool.
pub async fn connect(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))
}
