use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::{
    ProjectId, Task, TaskDefinitionInput, TaskId, TaskPriority, TaskStatus, UserId,
};

use crate::{Clock, ProjectRepository, TaskRepository, UserRepository, WriteCoordinator};

/// Input for creating a task.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskInput {
    /// Caller-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Owning project.
    pub project_id: Option<String>,
    /// Assigned user.
    pub assignee_id: Option<String>,
    /// Due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority, defaults to medium.
    pub priority: Option<TaskPriority>,
    /// Status, defaults to todo.
    pub status: Option<TaskStatus>,
}

/// Application service for task lifecycle.
#[derive(Clone)]
pub struct TaskService {
    task_repository: Arc<dyn TaskRepository>,
    project_repository: Arc<dyn ProjectRepository>,
    user_repository: Arc<dyn UserRepository>,
    coordinator: WriteCoordinator,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    /// Creates a new task service.
    #[must_use]
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        project_repository: Arc<dyn ProjectRepository>,
        user_repository: Arc<dyn UserRepository>,
        coordinator: WriteCoordinator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            task_repository,
            project_repository,
            user_repository,
            coordinator,
            clock,
        }
    }

    /// Persists a task created by `actor` and propagates it to the index.
    ///
    /// A referenced project or assignee must exist.
    pub async fn create_task(
        &self,
        actor: &UserIdentity,
        input: CreateTaskInput,
    ) -> AppResult<Task> {
        let id = match optional_text(input.id.as_deref()) {
            Some(value) => TaskId::parse(value)?,
            None => TaskId::new(),
        };
        let project_id = self.resolve_project(input.project_id.as_deref()).await?;
        let assignee_id = self.resolve_assignee(input.assignee_id.as_deref()).await?;

        let now = self.clock.now();
        let task = Task::new(TaskDefinitionInput {
            id,
            title: input.title,
            description: input.description,
            project_id,
            assignee_id,
            due_date: input.due_date,
            priority: input.priority.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            created_by: UserId::parse(actor.subject())?,
            created_at: now,
            updated_at: now,
        })?;
        let document = task.to_search_document()?;

        let repository = self.task_repository.clone();
        let stored = task.clone();
        self.coordinator
            .commit(async move { repository.create(stored).await }, document)
            .await?;

        info!(task_id = %task.id(), created_by = %task.created_by(), "task created");
        Ok(task)
    }

    /// Returns one task.
    pub async fn get_task(&self, task_id: &str) -> AppResult<Task> {
        let task_id = TaskId::parse(task_id)?;
        self.task_repository
            .get_by_id(&task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' not found")))
    }

    /// Lists all tasks.
    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.task_repository.get_all().await
    }

    /// Lists the tasks of an existing project.
    pub async fn list_project_tasks(&self, project_id: &str) -> AppResult<Vec<Task>> {
        let project_id = ProjectId::parse(project_id)?;
        if self
            .project_repository
            .get_by_id(&project_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "project '{project_id}' not found"
            )));
        }

        self.task_repository.list_by_project(&project_id).await
    }

    /// Deletes a task. The index entry is left for resync.
    pub async fn delete_task(&self, task_id: &str) -> AppResult<()> {
        let task_id = TaskId::parse(task_id)?;
        self.task_repository.delete(&task_id).await?;

        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    async fn resolve_project(&self, project_id: Option<&str>) -> AppResult<Option<ProjectId>> {
        let Some(value) = optional_text(project_id) else {
            return Ok(None);
        };
        let project_id = ProjectId::parse(value)?;
        if self
            .project_repository
            .get_by_id(&project_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!(
                "project '{project_id}' does not exist"
            )));
        }

        Ok(Some(project_id))
    }

    async fn resolve_assignee(&self, assignee_id: Option<&str>) -> AppResult<Option<UserId>> {
        let Some(value) = optional_text(assignee_id) else {
            return Ok(None);
        };
        let assignee_id = UserId::parse(value)?;
        if self
            .user_repository
            .find_by_id(&assignee_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!(
                "assignee '{assignee_id}' does not exist"
            )));
        }

        Ok(Some(assignee_id))
    }
}

fn optional_text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
