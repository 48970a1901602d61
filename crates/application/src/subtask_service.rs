use std::sync::Arc;

use tracing::info;

use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Subtask, SubtaskDefinitionInput, SubtaskId, TaskId};

use crate::{Clock, SubtaskRepository, TaskRepository};

/// Application service for task checklists.
#[derive(Clone)]
pub struct SubtaskService {
    task_repository: Arc<dyn TaskRepository>,
    subtask_repository: Arc<dyn SubtaskRepository>,
    clock: Arc<dyn Clock>,
}

impl SubtaskService {
    /// Creates a new subtask service.
    #[must_use]
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        subtask_repository: Arc<dyn SubtaskRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            task_repository,
            subtask_repository,
            clock,
        }
    }

    /// Adds an open subtask to an existing task. The identifier is always
    /// generated.
    pub async fn create_subtask(&self, task_id: &str, title: String) -> AppResult<Subtask> {
        let task_id = self.require_task(task_id).await?;
        let now = self.clock.now();
        let subtask = Subtask::new(SubtaskDefinitionInput {
            id: SubtaskId::new(),
            task_id,
            title,
            is_complete: false,
            created_at: now,
            updated_at: now,
        })?;

        self.subtask_repository.create(subtask.clone()).await?;

        info!(subtask_id = %subtask.id(), task_id = %subtask.task_id(), "subtask created");
        Ok(subtask)
    }

    /// Lists the subtasks of an existing task.
    pub async fn list_subtasks(&self, task_id: &str) -> AppResult<Vec<Subtask>> {
        let task_id = self.require_task(task_id).await?;
        self.subtask_repository.list_by_task(&task_id).await
    }

    async fn require_task(&self, task_id: &str) -> AppResult<TaskId> {
        let task_id = TaskId::parse(task_id)?;
        if self.task_repository.get_by_id(&task_id).await?.is_none() {
            return Err(AppError::NotFound(format!("task '{task_id}' not found")));
        }

        Ok(task_id)
    }
}
