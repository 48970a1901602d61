use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::TaskId;

/// Unique identifier for a subtask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtaskId(String);

impl SubtaskId {
    /// Creates a new random subtask identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a stored identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "subtask id must not be empty".to_owned(),
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

impl Default for SubtaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubtaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Input payload for constructing a subtask.
#[derive(Debug, Clone)]
pub struct SubtaskDefinitionInput {
    /// Subtask identifier.
    pub id: SubtaskId,
    /// Parent task.
    pub task_id: TaskId,
    /// Short title.
    pub title: String,
    /// Completion flag.
    pub is_complete: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Checklist item belonging to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    title: NonEmptyString,
    is_complete: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Subtask {
    /// Creates a subtask with validated fields.
    pub fn new(input: SubtaskDefinitionInput) -> AppResult<Self> {
        Ok(Self {
            id: input.id,
            task_id: input.task_id,
            title: NonEmptyString::new(input.title)
                .map_err(|_| AppError::Validation("subtask title must not be empty".to_owned()))?,
            is_complete: input.is_complete,
            created_at: input.created_at,
            updated_at: input.updated_at,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub fn id(&self) -> &SubtaskId {
        &self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns whether the item is done.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
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
