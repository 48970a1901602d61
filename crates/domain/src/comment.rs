use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::{TaskId, UserId};

/// Unique identifier for a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(String);

impl CommentId {
    /// Creates a new random comment identifier.
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
                "comment id must not be empty".to_owned(),
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

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Input payload for constructing a comment.
#[derive(Debug, Clone)]
pub struct CommentDefinitionInput {
    /// Comment identifier.
    pub id: CommentId,
    /// Task the comment is attached to.
    pub task_id: TaskId,
    /// Subject that wrote the comment.
    pub author_id: UserId,
    /// Comment body.
    pub content: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Free-text remark on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    content: NonEmptyString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with validated fields.
    pub fn new(input: CommentDefinitionInput) -> AppResult<Self> {
        Ok(Self {
            id: input.id,
            task_id: input.task_id,
            author_id: input.author_id,
            content: NonEmptyString::new(input.content).map_err(|_| {
                AppError::Validation("comment content must not be empty".to_owned())
            })?,
            created_at: input.created_at,
            updated_at: input.updated_at,
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Returns the creation instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification instant.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
