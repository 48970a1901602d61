//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::{RoleRepository, UserRecord, UserRepository};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Role, RoleId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role_id: i32,
    timezone: String,
    language: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::parse(row.id)?,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role_id: RoleId::new(row.role_id),
            timezone: row.timezone,
            language: row.language,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role_id, timezone, language, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| read_error(error, "find user by id"))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| read_error(error, "find user by email"))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list users"))?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role_id, timezone, language, created_at, updated_at
            )
            VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id.as_i32())
        .bind(&user.timezone)
        .bind(&user.language)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create user",
                "a user with this id or email already exists",
            )
        })?;

        Ok(())
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = LOWER($3), role_id = $4, timezone = $5, language = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role_id.as_i32())
        .bind(&user.timezone)
        .bind(&user.language)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| write_error(error, "update user", "email address is already registered"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{}' not found", user.id)));
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| write_error(error, "delete user", "user is still referenced"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        }

        Ok(())
    }
}

/// PostgreSQL implementation of the role repository port.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: i32,
    name: String,
    description: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = AppError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Role::new(RoleId::new(row.id), row.name, row.description)
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_id(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles WHERE id = $1",
        )
        .bind(role_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| read_error(error, "find role"))?;

        row.map(Role::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list roles"))?;

        rows.into_iter().map(Role::try_from).collect()
    }
}
