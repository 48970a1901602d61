//! In-memory adapters for the credential and primary stores.
//!
//! Used by tests and by `STORAGE_BACKEND=memory` local runs. All repositories
//! built from one [`InMemoryStore`] share its state, and deletes follow the
//! foreign keys of the PostgreSQL schema: removing a project removes its
//! tasks, removing a task removes its subtasks and comments, and removing a
//! user clears task assignees and drops the user's memberships, comments and
//! notifications.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tasklane_application::{
    ProjectRepository, RoleRepository, TaskRepository, UserRecord, UserRepository,
};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{
    Comment, MEMBER_ROLE_ID, Notification, Project, ProjectId, Role, RoleId, Subtask, Task,
    TaskId, UserId,
};

mod collaboration;

pub use collaboration::{
    InMemoryCommentRepository, InMemoryNotificationRepository, InMemoryProjectMemberRepository,
    InMemorySubtaskRepository,
};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, UserRecord>,
    projects: HashMap<String, Project>,
    tasks: HashMap<String, Task>,
    subtasks: HashMap<String, Subtask>,
    comments: HashMap<String, Comment>,
    notifications: HashMap<String, Notification>,
    memberships: Vec<(ProjectId, UserId)>,
}

impl StoreState {
    fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let removed = self.tasks.remove(task_id.as_str())?;
        self.subtasks
            .retain(|_, subtask| subtask.task_id() != task_id);
        self.comments
            .retain(|_, comment| comment.task_id() != task_id);
        Some(removed)
    }

    fn remove_project(&mut self, project_id: &ProjectId) -> Option<Project> {
        let removed = self.projects.remove(project_id.as_str())?;
        let owned: Vec<TaskId> = self
            .tasks
            .values()
            .filter(|task| task.project_id() == Some(project_id))
            .map(|task| task.id().clone())
            .collect();
        for task_id in &owned {
            self.remove_task(task_id);
        }
        self.memberships
            .retain(|(member_project, _)| member_project != project_id);
        Some(removed)
    }

    fn remove_user(&mut self, user_id: &UserId) -> Option<UserRecord> {
        let removed = self.users.remove(user_id.as_str())?;
        for task in self.tasks.values_mut() {
            if task.assignee_id() == Some(user_id) {
                task.unassign();
            }
        }
        self.memberships
            .retain(|(_, member_user)| member_user != user_id);
        self.comments
            .retain(|_, comment| comment.author_id() != user_id);
        self.notifications
            .retain(|_, notification| notification.user_id() != user_id);
        Some(removed)
    }

    fn sorted_tasks(&self, filter: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| filter(task))
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        tasks
    }
}

/// Shared state behind the in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserRecord>> {
        let state = self.store.state.read().await;
        Ok(state.users.get(user_id.as_str()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let email = email.to_lowercase();
        let state = self.store.state.read().await;
        let found = state.users.values().find(|user| user.email == email);
        Ok(found.cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        let state = self.store.state.read().await;
        let mut users: Vec<UserRecord> = state.users.values().cloned().collect();
        users.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.as_str().cmp(right.id.as_str()))
        });
        Ok(users)
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let taken = |existing: &UserRecord| existing.id == user.id || existing.email == user.email;
        if state.users.values().any(taken) {
            return Err(AppError::Conflict(
                "a user with this id or email already exists".to_owned(),
            ));
        }

        state.users.insert(user.id.as_str().to_owned(), user);
        Ok(())
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let taken = |existing: &UserRecord| existing.email == user.email && existing.id != user.id;
        if state.users.values().any(taken) {
            return Err(AppError::Conflict(
                "email address is already registered".to_owned(),
            ));
        }

        let existing = state
            .users
            .get_mut(user.id.as_str())
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id)))?;
        existing.name = user.name;
        existing.email = user.email;
        existing.role_id = user.role_id;
        existing.timezone = user.timezone;
        existing.language = user.language;
        existing.updated_at = user.updated_at;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        state
            .remove_user(user_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }
}

/// In-memory role repository seeded with the admin and member roles.
#[derive(Debug)]
pub struct InMemoryRoleRepository {
    roles: Vec<Role>,
}

impl InMemoryRoleRepository {
    /// Creates a repository holding `admin` (1) and `member` (2).
    pub fn seeded() -> AppResult<Self> {
        Ok(Self {
            roles: vec![
                Role::new(
                    RoleId::new(1),
                    "admin",
                    "Administrators manage users and roles",
                )?,
                Role::new(
                    MEMBER_ROLE_ID,
                    "member",
                    "Members work with projects and tasks",
                )?,
            ],
        })
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.iter().find(|role| role.id() == role_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.clone())
    }
}

/// In-memory project repository.
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    store: InMemoryStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let key = project.id().as_str().to_owned();
        if state.projects.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "project '{key}' already exists"
            )));
        }

        state.projects.insert(key, project);
        Ok(())
    }

    async fn get_by_id(&self, project_id: &ProjectId) -> AppResult<Option<Project>> {
        let state = self.store.state.read().await;
        Ok(state.projects.get(project_id.as_str()).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Project>> {
        let state = self.store.state.read().await;
        let mut projects: Vec<Project> = state.projects.values().cloned().collect();
        projects.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        Ok(projects)
    }

    async fn delete(&self, project_id: &ProjectId) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        state
            .remove_project(project_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("project '{project_id}' not found")))
    }
}

/// In-memory task repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: InMemoryStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let key = task.id().as_str().to_owned();
        if state.tasks.contains_key(&key) {
            return Err(AppError::Conflict(format!("task '{key}' already exists")));
        }
        let project_missing = task
            .project_id()
            .is_some_and(|project_id| !state.projects.contains_key(project_id.as_str()));
        let assignee_missing = task
            .assignee_id()
            .is_some_and(|user_id| !state.users.contains_key(user_id.as_str()));
        if project_missing || assignee_missing {
            return Err(AppError::Validation(
                "failed to create task: referenced record does not exist".to_owned(),
            ));
        }

        state.tasks.insert(key, task);
        Ok(())
    }

    async fn get_by_id(&self, task_id: &TaskId) -> AppResult<Option<Task>> {
        let state = self.store.state.read().await;
        Ok(state.tasks.get(task_id.as_str()).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Task>> {
        let state = self.store.state.read().await;
        Ok(state.sorted_tasks(|_| true))
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Task>> {
        let state = self.store.state.read().await;
        let tasks = state.sorted_tasks(|task| task.project_id() == Some(project_id));
        Ok(tasks)
    }

    async fn delete(&self, task_id: &TaskId) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        state
            .remove_task(task_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' not found")))
    }
}
