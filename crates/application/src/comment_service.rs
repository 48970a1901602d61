use std::sync::Arc;

use tracing::info;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::{Comment, CommentDefinitionInput, CommentId, TaskId, UserId};

use crate::{Clock, CommentRepository, TaskRepository};

/// Input for commenting on a task.
#[derive(Debug, Clone, Default)]
pub struct CreateCommentInput {
    /// Caller-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Task being commented on.
    pub task_id: String,
    /// Comment body.
    pub content: String,
}

/// Application service for task comments.
#[derive(Clone)]
pub struct CommentService {
    task_repository: Arc<dyn TaskRepository>,
    comment_repository: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    /// Creates a new comment service.
    #[must_use]
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        comment_repository: Arc<dyn CommentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            task_repository,
            comment_repository,
            clock,
        }
    }

    /// Stores a comment authored by `actor` on an existing task.
    pub async fn add_comment(
        &self,
        actor: &UserIdentity,
        input: CreateCommentInput,
    ) -> AppResult<Comment> {
        let id = match input.id.as_deref() {
            Some(value) if !value.trim().is_empty() => CommentId::parse(value)?,
            _ => CommentId::new(),
        };
        let task_id = TaskId::parse(input.task_id)?;
        if self.task_repository.get_by_id(&task_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "task '{task_id}' does not exist"
            )));
        }

        let now = self.clock.now();
        let comment = Comment::new(CommentDefinitionInput {
            id,
            task_id,
            author_id: UserId::parse(actor.subject())?,
            content: input.content,
            created_at: now,
            updated_at: now,
        })?;

        self.comment_repository.create(comment.clone()).await?;

        info!(comment_id = %comment.id(), task_id = %comment.task_id(), "comment added");
        Ok(comment)
    }

    /// Lists the comments on an existing task, oldest first.
    pub async fn list_task_comments(&self, task_id: &str) -> AppResult<Vec<Comment>> {
        let task_id = TaskId::parse(task_id)?;
        if self.task_repository.get_by_id(&task_id).await?.is_none() {
            return Err(AppError::NotFound(format!("task '{task_id}' not found")));
        }

        self.comment_repository.list_by_task(&task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeCommentRepository, FakeProjectRepository, FakeSearchIndex, FakeTaskRepository,
        FakeUserRepository, FixedClock,
    };
    use crate::{CreateTaskInput, TaskService, WriteCoordinator};

    struct Fixture {
        tasks: TaskService,
        comments: Arc<FakeCommentRepository>,
        service: CommentService,
    }

    fn fixture() -> Fixture {
        let task_repository = Arc::new(FakeTaskRepository::default());
        let comments = Arc::new(FakeCommentRepository::default());
        let clock = Arc::new(FixedClock::default());

        Fixture {
            tasks: TaskService::new(
                task_repository.clone(),
                Arc::new(FakeProjectRepository::default()),
                Arc::new(FakeUserRepository::default()),
                WriteCoordinator::new(Arc::new(FakeSearchIndex::default())),
                clock.clone(),
            ),
            comments: comments.clone(),
            service: CommentService::new(task_repository, comments, clock),
        }
    }

    fn comment_on(task_id: &str, content: &str) -> CreateCommentInput {
        CreateCommentInput {
            task_id: task_id.to_owned(),
            content: content.to_owned(),
            ..CreateCommentInput::default()
        }
    }

    #[tokio::test]
    async fn comment_author_is_the_caller() -> AppResult<()> {
        let fixture = fixture();
        let alice = UserIdentity::new("alice");
        let input = CreateTaskInput {
            title: "Ship release".to_owned(),
            ..CreateTaskInput::default()
        };
        let task = fixture.tasks.create_task(&alice, input).await?;

        let comment = fixture
            .service
            .add_comment(&alice, comment_on(task.id().as_str(), "Looks good"))
            .await?;

        assert_eq!(comment.author_id().as_str(), "alice");
        let listed = fixture
            .service
            .list_task_comments(task.id().as_str())
            .await?;
        assert_eq!(listed, vec![comment]);
        Ok(())
    }

    #[tokio::test]
    async fn comment_on_missing_task_is_rejected() {
        let fixture = fixture();

        let result = fixture
            .service
            .add_comment(&UserIdentity::new("alice"), comment_on("ghost", "Hello"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(fixture.comments.comments.lock().await.is_empty());
        assert!(matches!(
            fixture.service.list_task_comments("ghost").await,
            Err(AppError::NotFound(_))
        ));
    }
}
