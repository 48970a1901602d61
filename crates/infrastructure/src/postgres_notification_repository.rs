use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tasklane_application::NotificationRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Notification, NotificationDefinitionInput, NotificationId, UserId};

use crate::postgres_errors::{read_error, write_error};

/// PostgreSQL implementation of the notification repository port.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: String,
    #[sqlx(rename = "type")]
    kind: String,
    message: String,
    user_id: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Notification::new(NotificationDefinitionInput {
            id: NotificationId::parse(row.id)?,
            kind: row.kind,
            message: row.message,
            user_id: UserId::parse(row.user_id)?,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, type, message, user_id, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(notification.id().as_str())
        .bind(notification.kind())
        .bind(notification.message())
        .bind(notification.user_id().as_str())
        .bind(notification.is_read())
        .bind(notification.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            write_error(
                error,
                "create notification",
                &format!("notification '{}' already exists", notification.id()),
            )
        })?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, type, message, user_id, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| read_error(error, "list notifications"))?;

        rows.into_iter().map(Notification::try_from).collect()
    }
}
