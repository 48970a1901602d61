use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::SubtaskRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Subtask, SubtaskDefinitionInput, SubtaskId, TaskId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the subtask repository port.
#[derive(Clone)]
pub struct PostgresSubtaskRepository {
    pool: PgPool,
}

impl PostgresSubtaskRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubtaskRow {
    id: String,
    task_id: String,
    title: String,
    is_complete: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubtaskRow> for Subtask {
    type Error = AppError;

    fn try_from(row: SubtaskRow) -> Result<Self, Self::Error> {
        Subtask::new(SubtaskDefinitionInput {
            id: SubtaskId::parse(row.id)?,
            task_id: TaskId::parse(row.task_id)?,
            title: row.title,
            is_complete: row.is_complete,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SubtaskRepository for PostgresSubtaskRepository {
    async fn create(&self, subtask: Subtask) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subtasks (id, task_id, title, is_complete, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(subtask.id().as_str())
        .bind(subtask.task_id().as_str())
        .bind(subtask.title())
        .bind(subtask.is_complete())
        .bind(subtask.created_at())
        .bind(subtask.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create subtask",
                &format!("subtask '{}' already exists", subtask.id()),
            )
        })?;

        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Subtask>> {
        let rows = sqlx::query_as::<_, SubtaskRow>(
            r#"
            SELECT id, task_id, title, is_complete, created_at, updated_at
            FROM subtasks
            WHERE task_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(task_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list subtasks"))?;

        rows.into_iter().map(Subtask::try_from).collect()
    }
}
