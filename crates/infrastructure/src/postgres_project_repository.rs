use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::ProjectRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Project, ProjectDefinitionInput, ProjectId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the project repository port.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: String,
    name: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Project::new(ProjectDefinitionInput {
            id: ProjectId::parse(row.id)?,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            created_by: UserId::parse(row.created_by)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROJECT_COLUMNS: &str =
    "id, name, description, start_date, end_date, created_by, created_at, updated_at";

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, name, description, start_date, end_date, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.id().as_str())
        .bind(project.name())
        .bind(project.description())
        .bind(project.start_date())
        .bind(project.end_date())
        .bind(project.created_by().as_str())
        .bind(project.created_at())
        .bind(project.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create project",
                &format!("project '{}' already exists", project.id()),
            )
        })?;

        Ok(())
    }

    async fn get_by_id(&self, project_id: &ProjectId) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(project_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| read_error(error, "find project"))?;

        row.map(Project::try_from).transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list projects"))?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn delete(&self, project_id: &ProjectId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| write_error(error, "delete project", "project is still referenced"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "project '{project_id}' not found"
            )));
        }

        Ok(())
    }
}
