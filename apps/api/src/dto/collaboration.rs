use serde::{Deserialize, Serialize};
use tasklane_application::{CreateCommentInput, CreateNotificationInput, ProjectMember};
use tasklane_domain::{Comment, Notification, Subtask};
use ts_rs::TS;

/// One member of a project.
#[derive(Debug, Serialize, TS)]
pub struct ProjectMemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<ProjectMember> for ProjectMemberResponse {
    fn from(member: ProjectMember) -> Self {
        Self {
            id: member.user_id.to_string(),
            name: member.name,
            email: member.email,
        }
    }
}

/// Incoming payload for `POST /tasks/{task_id}/subtasks`.
#[derive(Debug, Deserialize, TS)]
pub struct CreateSubtaskRequest {
    pub title: String,
}

/// API representation of a subtask.
#[derive(Debug, Serialize, TS)]
pub struct SubtaskResponse {
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub is_complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Subtask> for SubtaskResponse {
    fn from(subtask: Subtask) -> Self {
        Self {
            id: subtask.id().to_string(),
            task_id: subtask.task_id().to_string(),
            title: subtask.title().to_owned(),
            is_complete: subtask.is_complete(),
            created_at: subtask.created_at().to_rfc3339(),
            updated_at: subtask.updated_at().to_rfc3339(),
        }
    }
}

/// Incoming payload for `POST /comments`. The author is the caller.
#[derive(Debug, Deserialize, TS)]
pub struct CreateCommentRequest {
    pub id: Option<String>,
    pub task_id: String,
    pub content: String,
}

impl From<CreateCommentRequest> for CreateCommentInput {
    fn from(request: CreateCommentRequest) -> Self {
        Self {
            id: request.id,
            task_id: request.task_id,
            content: request.content,
        }
    }
}

/// API representation of a comment.
#[derive(Debug, Serialize, TS)]
pub struct CommentResponse {
    pub id: String,
    pub task_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id().to_string(),
            task_id: comment.task_id().to_string(),
            author_id: comment.author_id().to_string(),
            content: comment.content().to_owned(),
            created_at: comment.created_at().to_rfc3339(),
            updated_at: comment.updated_at().to_rfc3339(),
        }
    }
}

/// Incoming payload for `POST /notifications`.
#[derive(Debug, Deserialize, TS)]
pub struct CreateNotificationRequest {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub user_id: String,
}

impl From<CreateNotificationRequest> for CreateNotificationInput {
    fn from(request: CreateNotificationRequest) -> Self {
        Self {
            id: request.id,
            kind: request.kind,
            message: request.message,
            user_id: request.user_id,
        }
    }
}

/// API representation of a notification.
#[derive(Debug, Serialize, TS)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub user_id: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id().to_string(),
            kind: notification.kind().to_owned(),
            message: notification.message().to_owned(),
            user_id: notification.user_id().to_string(),
            is_read: notification.is_read(),
            created_at: notification.created_at().to_rfc3339(),
        }
    }
}
