use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::CommentRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Comment, CommentDefinitionInput, CommentId, TaskId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the comment repository port.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: String,
    task_id: String,
    author_id: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = AppError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Comment::new(CommentDefinitionInput {
            id: CommentId::parse(row.id)?,
            task_id: TaskId::parse(row.task_id)?,
            author_id: UserId::parse(row.author_id)?,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, task_id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id().as_str())
        .bind(comment.task_id().as_str())
        .bind(comment.author_id().as_str())
        .bind(comment.content())
        .bind(comment.created_at())
        .bind(comment.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create comment",
                &format!("comment '{}' already exists", comment.id()),
            )
        })?;

        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, task_id, author_id, content, created_at, updated_at
            FROM comments
            WHERE task_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(task_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list comments"))?;

        rows.into_iter().map(Comment::try_from).collect()
    }
}
