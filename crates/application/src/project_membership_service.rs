use std::sync::Arc;

use tracing::info;

use tasklane_core::{AppError, AppResult};
use tasklane_domain::{ProjectId, UserId};

use crate::{ProjectMember, ProjectMemberRepository, ProjectRepository, UserRepository};

/// Application service for project membership.
#[derive(Clone)]
pub struct ProjectMembershipService {
    project_repository: Arc<dyn ProjectRepository>,
    user_repository: Arc<dyn UserRepository>,
    member_repository: Arc<dyn ProjectMemberRepository>,
}

impl ProjectMembershipService {
    /// Creates a new membership service.
    #[must_use]
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        user_repository: Arc<dyn UserRepository>,
        member_repository: Arc<dyn ProjectMemberRepository>,
    ) -> Self {
        Self {
            project_repository,
            user_repository,
            member_repository,
        }
    }

    /// Adds an existing user to an existing project.
    pub async fn add_member(&self, project_id: &str, user_id: &str) -> AppResult<()> {
        let project_id = self.require_project(project_id).await?;
        let user_id = UserId::parse(user_id)?;
        if self.user_repository.find_by_id(&user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        }

        self.member_repository
            .add_member(&project_id, &user_id)
            .await?;

        info!(project_id = %project_id, user_id = %user_id, "project member added");
        Ok(())
    }

    /// Lists the members of an existing project.
    pub async fn list_members(&self, project_id: &str) -> AppResult<Vec<ProjectMember>> {
        let project_id = self.require_project(project_id).await?;
        self.member_repository.list_members(&project_id).await
    }

    async fn require_project(&self, project_id: &str) -> AppResult<ProjectId> {
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

        Ok(project_id)
    }
}
