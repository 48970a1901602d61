use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use tasklane_core::UserIdentity;

use crate::dto::{
    CommentResponse, CreateCommentRequest, CreateNotificationRequest, CreateSubtaskRequest,
    CreatedResponse, GenericMessageResponse, NotificationResponse, ProjectMemberResponse,
    SubtaskResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_project_members_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<ProjectMemberResponse>>> {
    let members = state
        .membership_service
        .list_members(project_id.as_str())
        .await?
        .into_iter()
        .map(ProjectMemberResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn add_project_member_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .membership_service
        .add_member(project_id.as_str(), user_id.as_str())
        .await?;

    Ok(Json(GenericMessageResponse::new("member added")))
}

pub async fn list_subtasks_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Vec<SubtaskResponse>>> {
    let subtasks = state
        .subtask_service
        .list_subtasks(task_id.as_str())
        .await?
        .into_iter()
        .map(SubtaskResponse::from)
        .collect();

    Ok(Json(subtasks))
}

pub async fn create_subtask_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(task_id): Path<String>,
    Json(payload): Json<CreateSubtaskRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let subtask = state
        .subtask_service
        .create_subtask(task_id.as_str(), payload.title)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: subtask.id().to_string(),
        }),
    ))
}

pub async fn list_task_comments_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state
        .comment_service
        .list_task_comments(task_id.as_str())
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(Json(comments))
}

pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let comment = state
        .comment_service
        .add_comment(&user, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: comment.id().to_string(),
        }),
    ))
}

pub async fn list_notifications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_notifications(&user)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(notifications))
}

pub async fn create_notification_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Json(payload): Json<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let notification = state
        .notification_service
        .create_notification(payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: notification.id().to_string(),
        }),
    ))
}
