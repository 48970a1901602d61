use async_trait::async_trait;
use sqlx::PgPool;

use tasklane_application::{ProjectMember, ProjectMemberRepository};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{ProjectId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the project membership port.
#[derive(Clone)]
pub struct PostgresProjectMemberRepository {
    pool: PgPool,
}

impl PostgresProjectMemberRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: String,
    name: String,
    email: String,
}

impl TryFrom<MemberRow> for ProjectMember {
    type Error = AppError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(ProjectMember {
            user_id: UserId::parse(row.id)?,
            name: row.name,
            email: row.email,
        })
    }
}

#[async_trait]
impl ProjectMemberRepository for PostgresProjectMemberRepository {
    async fn add_member(&self, project_id: &ProjectId, user_id: &UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (project_id, user_id) DO NOTHING
            "#,
        )
        .bind(project_id.as_str())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| write_error(error, "add project member", "member already exists"))?;

        Ok(())
    }

    async fn list_members(&self, project_id: &ProjectId) -> AppResult<Vec<ProjectMember>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT u.id, u.name, u.email
            FROM project_members pm
            JOIN users u ON u.id = pm.user_id
            WHERE pm.project_id = $1
            ORDER BY u.name ASC, u.id ASC
            "#,
        )
        .bind(project_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list project members"))?;

        rows.into_iter().map(ProjectMember::try_from).collect()
    }
}
