//! Fakes shared by the service test modules.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use tasklane_core::{AppError, AppResult, TokenError};
use tasklane_domain::{
    Comment, MEMBER_ROLE_ID, Notification, Project, ProjectId, Role, RoleId, SEARCH_PAGE_SIZE,
    SearchDocument, Subtask, Task, TaskId, UserId,
};

use crate::{
    Clock, CommentRepository, IdentityClaims, IdentityTokenCodec, NotificationRepository,
    PasswordHasher, ProjectMember, ProjectMemberRepository, ProjectRepository, RoleRepository,
    SearchIndex, SubtaskRepository, TaskRepository, UserRecord, UserRepository,
};

pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        let start = DateTime::from_timestamp(1_735_732_800, 0);
        Self(start.unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub(crate) struct FakeProjectRepository {
    pub projects: Mutex<Vec<Project>>,
    pub fail_writes: AtomicBool,
}

#[async_trait]
impl ProjectRepository for FakeProjectRepository {
    async fn create(&self, project: Project) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("primary store offline".to_owned()));
        }
        let mut projects = self.projects.lock().await;
        if projects.iter().any(|existing| existing.id() == project.id()) {
            return Err(AppError::Conflict(format!(
                "project '{}' already exists",
                project.id()
            )));
        }
        projects.push(project);
        Ok(())
    }

    async fn get_by_id(&self, project_id: &ProjectId) -> AppResult<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .find(|project| project.id() == project_id)
            .cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Project>> {
        Ok(self.projects.lock().await.clone())
    }

    async fn delete(&self, project_id: &ProjectId) -> AppResult<()> {
        let mut projects = self.projects.lock().await;
        let before = projects.len();
        projects.retain(|project| project.id() != project_id);
        if projects.len() == before {
            return Err(AppError::NotFound(format!(
                "project '{project_id}' not found"
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeTaskRepository {
    pub tasks: Mutex<Vec<Task>>,
    pub fail_reads: AtomicBool,
}

#[async_trait]
impl TaskRepository for FakeTaskRepository {
    async fn create(&self, task: Task) -> AppResult<()> {
        self.tasks.lock().await.push(task);
        Ok(())
    }

    async fn get_by_id(&self, task_id: &TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.id() == task_id)
            .cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Task>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal("task table unavailable".to_owned()));
        }
        Ok(self.tasks.lock().await.clone())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .filter(|task| task.project_id() == Some(project_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, task_id: &TaskId) -> AppResult<()> {
        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|task| task.id() != task_id);
        if tasks.len() == before {
            return Err(AppError::NotFound(format!("task '{task_id}' not found")));
        }
        Ok(())
    }
}

/// Index fake that can be told to reject submissions for specific ids.
#[derive(Default)]
pub(crate) struct FakeSearchIndex {
    pub documents: Mutex<HashMap<String, SearchDocument>>,
    pub submissions: Mutex<usize>,
    pub unreachable: AtomicBool,
    pub rejected_ids: Mutex<Vec<String>>,
}

#[async_trait]
impl SearchIndex for FakeSearchIndex {
    async fn submit(&self, document: &SearchDocument) -> AppResult<()> {
        *self.submissions.lock().await += 1;
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("connection refused".to_owned()));
        }
        if self
            .rejected_ids
            .lock()
            .await
            .iter()
            .any(|id| id == document.id())
        {
            return Err(AppError::Internal("document rejected".to_owned()));
        }
        self.documents
            .lock()
            .await
            .insert(document.id().to_owned(), document.clone());
        Ok(())
    }

    async fn query(&self, keyword: &str) -> AppResult<Vec<SearchDocument>> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("connection refused".to_owned()));
        }
        let mut matches: Vec<SearchDocument> = self
            .documents
            .lock()
            .await
            .values()
            .filter(|document| document.matches_keyword(keyword))
            .cloned()
            .collect();
        matches.sort_by(|left, right| left.id().cmp(right.id()));
        matches.truncate(SEARCH_PAGE_SIZE);
        Ok(matches)
    }
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub users: Mutex<Vec<UserRecord>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| &user.id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        Ok(self.users.lock().await.clone())
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if users
            .iter()
            .any(|existing| existing.id == user.id || existing.email == user.email)
        {
            return Err(AppError::Conflict("user already exists".to_owned()));
        }
        users.push(user);
        Ok(())
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let existing = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id)))?;
        *existing = user;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| &user.id != user_id);
        if users.len() == before {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        }
        Ok(())
    }
}

pub(crate) struct FakeRoleRepository {
    pub roles: Vec<Role>,
}

impl Default for FakeRoleRepository {
    fn default() -> Self {
        let roles = [
            Role::new(RoleId::new(1), "admin", "Administrators"),
            Role::new(MEMBER_ROLE_ID, "member", "Members"),
        ]
        .into_iter()
        .filter_map(Result::ok)
        .collect();

        Self { roles }
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn find_by_id(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.iter().find(|role| role.id() == role_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.clone())
    }
}

/// Stores passwords as `hashed:<plaintext>`.
pub(crate) struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Token codec that encodes claims as `subject|exp`.
pub(crate) struct PlainTokenCodec;

impl IdentityTokenCodec for PlainTokenCodec {
    fn encode(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        Ok(format!("{}|{}", claims.subject, claims.expires_at))
    }

    fn decode(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let (subject, expires_at) = token.split_once('|').ok_or(TokenError::InvalidToken)?;
        Ok(IdentityClaims {
            subject: subject.to_owned(),
            issued_at: 0,
            expires_at: expires_at.parse().map_err(|_| TokenError::InvalidToken)?,
        })
    }
}

/// Membership fake that resolves member details from a user fake.
pub(crate) struct FakeProjectMemberRepository {
    pub memberships: Mutex<Vec<(ProjectId, UserId)>>,
    users: Arc<FakeUserRepository>,
}

impl FakeProjectMemberRepository {
    pub fn new(users: Arc<FakeUserRepository>) -> Self {
        Self {
            memberships: Mutex::new(Vec::new()),
            users,
        }
    }
}

#[async_trait]
impl ProjectMemberRepository for FakeProjectMemberRepository {
    async fn add_member(&self, project_id: &ProjectId, user_id: &UserId) -> AppResult<()> {
        let mut memberships = self.memberships.lock().await;
        let entry = (project_id.clone(), user_id.clone());
        if !memberships.contains(&entry) {
            memberships.push(entry);
        }
        Ok(())
    }

    async fn list_members(&self, project_id: &ProjectId) -> AppResult<Vec<ProjectMember>> {
        let memberships = self.memberships.lock().await;
        let users = self.users.users.lock().await;
        let mut members: Vec<ProjectMember> = users
            .iter()
            .filter(|user| memberships.contains(&(project_id.clone(), user.id.clone())))
            .map(|user| ProjectMember {
                user_id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
            })
            .collect();
        members.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(members)
    }
}

#[derive(Default)]
pub(crate) struct FakeSubtaskRepository {
    pub subtasks: Mutex<Vec<Subtask>>,
}

#[async_trait]
impl SubtaskRepository for FakeSubtaskRepository {
    async fn create(&self, subtask: Subtask) -> AppResult<()> {
        self.subtasks.lock().await.push(subtask);
        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Subtask>> {
        Ok(self
            .subtasks
            .lock()
            .await
            .iter()
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeCommentRepository {
    pub comments: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for FakeCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        self.comments.lock().await.push(comment);
        Ok(())
    }

    async fn list_by_task(&self, task_id: &TaskId) -> AppResult<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .await
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeNotificationRepository {
    pub notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for FakeNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        self.notifications.lock().await.push(notification);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .await
            .iter()
            .filter(|notification| notification.user_id() == user_id)
            .cloned()
            .collect())
    }
}
