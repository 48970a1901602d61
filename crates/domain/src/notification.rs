use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::UserId;

/// Unique identifier for a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates a new random notification identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a caller-supplied identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "notification id must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Input payload for constructing a notification.
#[derive(Debug, Clone)]
pub struct NotificationDefinitionInput {
    /// Notification identifier.
    pub id: NotificationId,
    /// Free-form category such as `task_assigned`.
    pub kind: String,
    /// Human-readable text.
    pub message: String,
    /// Recipient.
    pub user_id: UserId,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    kind: NonEmptyString,
    message: NonEmptyString,
    user_id: UserId,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification with validated fields.
    pub fn new(input: NotificationDefinitionInput) -> AppResult<Self> {
        Ok(Self {
            id: input.id,
            kind: NonEmptyString::new(input.kind).map_err(|_| {
                AppError::Validation("notification type must not be empty".to_owned())
            })?,
            message: NonEmptyString::new(input.message).map_err(|_| {
                AppError::Validation("notification message must not be empty".to_owned())
            })?,
            user_id: input.user_id,
            is_read: input.is_read,
            created_at: input.created_at,
        })
    }

    /// Returns the notification identifier.
    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Returns the category.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the recipient.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the read flag.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the creation instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
