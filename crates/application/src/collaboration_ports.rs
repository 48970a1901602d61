//! Ports for project membership, subtasks, comments and notifications.

use async_trait::async_trait;

use tasklane_core::AppResult;
use tasklane_domain::{Comment, Notification, ProjectId, Subtask, TaskId, UserId};

/// User listed as a member of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    /// Member identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
}

/// Repository port for project membership.
#[async_trait]
pub trait ProjectMemberRepository: Send + Sync {
    /// Records that `user_id` belongs to `project_id`. Repeating it is a no-op.
    async fn add_member(&self, project_id: &ProjectId, user_id: &UserId) -> AppResult<()>;

    /// Lists the members of a project ordered by name.
    async fn list_members(&self, project_id: &ProjectId) -> AppResult<Vec<ProjectMember>>;
}

/// Repository port for subtasks.
#[async_trait]
pub trait SubtaskRepository: Send + Sync {
    /// Persists a new subtask. Duplicate id yields `Conflict`.
    async fn create(&self, subtask: Subtask) -> AppResult<()>;

    /// Lists the subtasks of one task, oldest first.
    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Subtask>>;
}

/// Repository port for task comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persists a new comment. Duplicate id yields `Conflict`.
    async fn create(&self, comment: Comment) -> AppResult<()>;

    /// Lists the comments on one task, oldest first.
    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Comment>>;
}

/// Repository port for user notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persists a new notification. Duplicate id yields `Conflict`.
    async fn create(&self, notification: Notification) -> AppResult<()>;

    /// Lists the notifications addressed to one user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>>;
}
