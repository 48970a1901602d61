use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use tasklane_application::CreateProjectInput;
use tasklane_core::UserIdentity;

use crate::dto::{
    CreateProjectRequest, CreatedResponse, GenericMessageResponse, ProjectResponse, TaskResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_projects_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state
        .project_service
        .list_projects()
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let input = CreateProjectInput::try_from(payload)?;
    let project = state.project_service.create_project(&user, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: project.id().to_string(),
        }),
    ))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .project_service
        .get_project(project_id.as_str())
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn delete_project_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .project_service
        .delete_project(project_id.as_str())
        .await?;

    Ok(Json(GenericMessageResponse::new("project deleted")))
}

pub async fn list_project_tasks_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state
        .task_service
        .list_project_tasks(project_id.as_str())
        .await?
        .into_iter()
        .map(TaskResponse::from)
        .collect();

    Ok(Json(tasks))
}
