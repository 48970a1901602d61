use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use tasklane_application::CreateTaskInput;
use tasklane_core::UserIdentity;

use crate::dto::{CreateTaskRequest, CreatedResponse, GenericMessageResponse, TaskResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state
        .task_service
        .list_tasks()
        .await?
        .into_iter()
        .map(TaskResponse::from)
        .collect();

    Ok(Json(tasks))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let input = CreateTaskInput::try_from(payload)?;
    let task = state.task_service.create_task(&user, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: task.id().to_string(),
        }),
    ))
}

pub async fn get_task_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.task_service.get_task(task_id.as_str()).await?;

    Ok(Json(TaskResponse::from(task)))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state.task_service.delete_task(task_id.as_str()).await?;

    Ok(Json(GenericMessageResponse::new("task deleted")))
}
