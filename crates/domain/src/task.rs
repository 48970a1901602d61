use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::{DocumentType, ProjectId, SearchDocument, UserId};

/// Unique identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a caller-supplied identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("task id must not be empty".to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::Validation(format!(
                "unknown task priority '{other}'"
            ))),
        }
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(AppError::Validation(format!(
                "unknown task status '{other}'"
            ))),
        }
    }
}

/// Input payload for constructing a task.
#[derive(Debug, Clone)]
pub struct TaskDefinitionInput {
    /// Task identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Owning project, if any.
    pub project_id: Option<ProjectId>,
    /// Assigned user, if any.
    pub assignee_id: Option<UserId>,
    /// Due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: TaskPriority,
    /// Status.
    pub status: TaskStatus,
    /// Subject that created the task.
    pub created_by: UserId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate as persisted in the primary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: NonEmptyString,
    description: String,
    project_id: Option<ProjectId>,
    assignee_id: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    priority: TaskPriority,
    status: TaskStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with validated fields.
    pub fn new(input: TaskDefinitionInput) -> AppResult<Self> {
        Ok(Self {
            id: input.id,
            title: NonEmptyString::new(input.title)
                .map_err(|_| AppError::Validation("task title must not be empty".to_owned()))?,
            description: input.description,
            project_id: input.project_id,
            assignee_id: input.assignee_id,
            due_date: input.due_date,
            priority: input.priority,
            status: input.status,
            created_by: input.created_by,
            created_at: input.created_at,
            updated_at: input.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the owning project.
    #[must_use]
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the assigned user.
    #[must_use]
    pub fn assignee_id(&self) -> Option<&UserId> {
        self.assignee_id.as_ref()
    }

    /// Returns the due instant.
    #[must_use]
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creating subject.
    #[must_use]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
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

    /// Clears the assignee, as when the assigned user is removed.
    pub fn unassign(&mut self) {
        self.assignee_id = None;
    }

    /// Derives the search projection.
    pub fn to_search_document(&self) -> AppResult<SearchDocument> {
        SearchDocument::new(
            self.id.as_str(),
            DocumentType::Task,
            self.title.as_str(),
            self.description.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskDefinitionInput {
        let now = Utc::now();
        TaskDefinitionInput {
            id: TaskId::new(),
            title: title.to_owned(),
            description: "Draft the release notes".to_owned(),
            project_id: None,
            assignee_id: None,
            due_date: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn defaults_are_medium_and_todo() -> AppResult<()> {
        let task = Task::new(input("Write notes"))?;

        assert_eq!(task.priority(), TaskPriority::Medium);
        assert_eq!(task.status(), TaskStatus::Todo);
        Ok(())
    }

    #[test]
    fn search_document_carries_task_type() -> AppResult<()> {
        let task = Task::new(input("Write notes"))?;
        let document = task.to_search_document()?;

        assert_eq!(document.document_type(), DocumentType::Task);
        assert_eq!(document.title(), "Write notes");
        assert_eq!(document.id(), task.id().as_str());
        Ok(())
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(Task::new(input("")).is_err());
    }

    #[test]
    fn status_and_priority_parse_storage_values() -> AppResult<()> {
        assert_eq!("in_progress".parse::<TaskStatus>()?, TaskStatus::InProgress);
        assert_eq!("high".parse::<TaskPriority>()?, TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("blocked".parse::<TaskStatus>().is_err());
        Ok(())
    }
}
