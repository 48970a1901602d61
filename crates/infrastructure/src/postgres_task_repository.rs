use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::TaskRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{ProjectId, Task, TaskDefinitionInput, TaskId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the task repository port.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: String,
    project_id: Option<String>,
    assignee_id: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: String,
    status: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Task::new(TaskDefinitionInput {
            id: TaskId::parse(row.id)?,
            title: row.title,
            description: row.description,
            project_id: row.project_id.map(ProjectId::parse).transpose()?,
            assignee_id: row.assignee_id.map(UserId::parse).transpose()?,
            due_date: row.due_date,
            priority: row.priority.parse()?,
            status: row.status.parse()?,
            created_by: UserId::parse(row.created_by)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const TASK_COLUMNS: &str = "id, title, description, project_id, assignee_id, due_date, priority, \
                            status, created_by, created_at, updated_at";

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, title, description, project_id, assignee_id, due_date, priority, status,
                created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(task.id().as_str())
        .bind(task.title())
        .bind(task.description())
        .bind(task.project_id().map(ProjectId::as_str))
        .bind(task.assignee_id().map(UserId::as_str))
        .bind(task.due_date())
        .bind(task.priority().as_str())
        .bind(task.status().as_str())
        .bind(task.created_by().as_str())
        .bind(task.created_at())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create task",
                &format!("task '{}' already exists", task.id()),
            )
        })?;

        Ok(())
    }

    async fn get_by_id(&self, task_id: &TaskId) -> AppResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(task_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| read_error(error, "find task"))?;

        row.map(Task::try_from).transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list tasks"))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 \
             ORDER BY created_at DESC, id ASC"
        ))
        .bind(project_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list project tasks"))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn delete(&self, task_id: &TaskId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| read_error(error, "delete task"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task '{task_id}' not found")));
        }

        Ok(())
    }
}
