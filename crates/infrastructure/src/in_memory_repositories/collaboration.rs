use tasklane_application::{
    CommentRepository, NotificationRepository, ProjectMember, ProjectMemberRepository,
    SubtaskRepository,
};

use super::*;

fn missing_reference(operation: &str) -> AppError {
    AppError::Validation(format!(
        "failed to {operation}: referenced record does not exist"
    ))
}

/// In-memory project membership repository.
#[derive(Debug, Clone)]
pub struct InMemoryProjectMemberRepository {
    store: InMemoryStore,
}

impl InMemoryProjectMemberRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectMemberRepository for InMemoryProjectMemberRepository {
    async fn add_member(&self, project_id: &ProjectId, user_id: &UserId) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        if !state.projects.contains_key(project_id.as_str())
            || !state.users.contains_key(user_id.as_str())
        {
            return Err(missing_reference("add project member"));
        }

        let entry = (project_id.clone(), user_id.clone());
        if !state.memberships.contains(&entry) {
            state.memberships.push(entry);
        }
        Ok(())
    }

    async fn list_members(&self, project_id: &ProjectId) -> AppResult<Vec<ProjectMember>> {
        let state = self.store.state.read().await;
        let mut members: Vec<ProjectMember> = state
            .memberships
            .iter()
            .filter(|(member_project, _)| member_project == project_id)
            .filter_map(|(_, user_id)| state.users.get(user_id.as_str()))
            .map(|user| ProjectMember {
                user_id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
            })
            .collect();
        members.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.user_id.as_str().cmp(right.user_id.as_str()))
        });
        Ok(members)
    }
}

/// In-memory subtask repository.
#[derive(Debug, Clone)]
pub struct InMemorySubtaskRepository {
    store: InMemoryStore,
}

impl InMemorySubtaskRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubtaskRepository for InMemorySubtaskRepository {
    async fn create(&self, subtask: Subtask) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let key = subtask.id().as_str().to_owned();
        if state.subtasks.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "subtask '{key}' already exists"
            )));
        }
        if !state.tasks.contains_key(subtask.task_id().as_str()) {
            return Err(missing_reference("create subtask"));
        }

        state.subtasks.insert(key, subtask);
        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Subtask>> {
        let state = self.store.state.read().await;
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .values()
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned()
            .collect();
        subtasks.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        Ok(subtasks)
    }
}

/// In-memory comment repository.
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

impl InMemoryCommentRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let key = comment.id().as_str().to_owned();
        if state.comments.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "comment '{key}' already exists"
            )));
        }
        if !state.tasks.contains_key(comment.task_id().as_str())
            || !state.users.contains_key(comment.author_id().as_str())
        {
            return Err(missing_reference("create comment"));
        }

        state.comments.insert(key, comment);
        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Comment>> {
        let state = self.store.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        Ok(comments)
    }
}

/// In-memory notification repository.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationRepository {
    store: InMemoryStore,
}

impl InMemoryNotificationRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let key = notification.id().as_str().to_owned();
        if state.notifications.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "notification '{key}' already exists"
            )));
        }
        if !state.users.contains_key(notification.user_id().as_str()) {
            return Err(missing_reference("create notification"));
        }

        state.notifications.insert(key, notification);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        let state = self.store.state.read().await;
        let mut notifications: Vec<Notification> = state
            .notifications
            .values()
            .filter(|notification| notification.user_id() == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        Ok(notifications)
    }
}
