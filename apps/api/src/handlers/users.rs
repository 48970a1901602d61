use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use tasklane_core::UserIdentity;

use crate::dto::{
    CreateUserRequest, CreatedResponse, GenericMessageResponse, LoginRequest, LoginResponse,
    RegisterRequest, RoleResponse, UpdateUserRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let user_id = state.user_service.register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: user_id.to_string(),
        }),
    ))
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state
        .user_service
        .login(payload.email.as_str(), payload.password.as_str())
        .await?;

    Ok(Json(LoginResponse { token }))
}

pub async fn current_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserResponse>> {
    let profile = state.user_service.current_user(&user).await?;

    Ok(Json(UserResponse::from(profile)))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&user)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .user_service
        .list_roles(&user)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let user_id = state
        .user_service
        .create_user(&user, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: user_id.to_string(),
        }),
    ))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .user_service
        .update_user(&user, user_id.as_str(), payload.into())
        .await?;

    Ok(Json(GenericMessageResponse::new("user updated")))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .user_service
        .delete_user(&user, user_id.as_str())
        .await?;

    Ok(Json(GenericMessageResponse::new("user deleted")))
}
