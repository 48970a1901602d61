use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::{Project, ProjectDefinitionInput, ProjectId, UserId};

use crate::{Clock, ProjectRepository, WriteCoordinator};

/// Input for creating a project.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectInput {
    /// Caller-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Planned start.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end.
    pub end_date: Option<DateTime<Utc>>,
}

/// Application service for project lifecycle.
#[derive(Clone)]
pub struct ProjectService {
    repository: Arc<dyn ProjectRepository>,
    coordinator: WriteCoordinator,
    clock: Arc<dyn Clock>,
}

impl ProjectService {
    /// Creates a new project service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        coordinator: WriteCoordinator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            coordinator,
            clock,
        }
    }

    /// Persists a project owned by `actor` and propagates it to the index.
    pub async fn create_project(
        &self,
        actor: &UserIdentity,
        input: CreateProjectInput,
    ) -> AppResult<Project> {
        let id = match input.id.as_deref() {
            Some(value) if !value.trim().is_empty() => ProjectId::parse(value)?,
            _ => ProjectId::new(),
        };
        let now = self.clock.now();
        let project = Project::new(ProjectDefinitionInput {
            id,
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            created_by: UserId::parse(actor.subject())?,
            created_at: now,
            updated_at: now,
        })?;
        let document = project.to_search_document()?;

        let repository = self.repository.clone();
        let stored = project.clone();
        self.coordinator
            .commit(async move { repository.create(stored).await }, document)
            .await?;

        info!(project_id = %project.id(), created_by = %project.created_by(), "project created");
        Ok(project)
    }

    /// Returns one project.
    pub async fn get_project(&self, project_id: &str) -> AppResult<Project> {
        let project_id = ProjectId::parse(project_id)?;
        self.repository
            .get_by_id(&project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project '{project_id}' not found")))
    }

    /// Lists all projects.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.repository.get_all().await
    }

    /// Deletes a project. The index entry is left for resync.
    pub async fn delete_project(&self, project_id: &str) -> AppResult<()> {
        let project_id = ProjectId::parse(project_id)?;
        self.repository.delete(&project_id).await?;

        info!(project_id = %project_id, "project deleted");
        Ok(())
    }
}
