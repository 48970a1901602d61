//! Primary store and search index ports.

use async_trait::async_trait;

use tasklane_core::AppResult;
use tasklane_domain::{Project, ProjectId, SearchDocument, Task, TaskId};

/// Repository port for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persists a new project atomically. Duplicate id yields `Conflict`.
    async fn create(&self, project: Project) -> AppResult<()>;

    /// Finds a project by identifier.
    async fn get_by_id(&self, project_id: &ProjectId) -> AppResult<Option<Project>>;

    /// Lists all projects, newest first.
    async fn get_all(&self) -> AppResult<Vec<Project>>;

    /// Deletes a project. Missing yields `NotFound`.
    async fn delete(&self, project_id: &ProjectId) -> AppResult<()>;
}

/// Repository port for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task atomically. Duplicate id yields `Conflict`.
    async fn create(&self, task: Task) -> AppResult<()>;

    /// Finds a task by identifier.
    async fn get_by_id(&self, task_id: &TaskId) -> AppResult<Option<Task>>;

    /// Lists all tasks, newest first.
    async fn get_all(&self) -> AppResult<Vec<Task>>;

    /// Lists the tasks of one project, newest first.
    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Task>>;

    /// Deletes a task. Missing yields `NotFound`.
    async fn delete(&self, task_id: &TaskId) -> AppResult<()>;
}

/// Port for the secondary full-text index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Upserts one document. Submitting the same document twice is a no-op.
    async fn submit(&self, document: &SearchDocument) -> AppResult<()>;

    /// Substring match against title and description, at most
    /// `SEARCH_PAGE_SIZE` documents in index relevance order.
    async fn query(&self, keyword: &str) -> AppResult<Vec<SearchDocument>>;
}
