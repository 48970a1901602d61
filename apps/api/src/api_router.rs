mod cors;

#[cfg(test)]
mod tests;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use tasklane_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    // Every route below runs through the gate; the gate's allow-list decides
    // which of them are public.
    let gated_routes = Router::new()
        .route("/users/register", post(handlers::users::register_handler))
        .route("/users/login", post(handlers::users::login_handler))
        .route("/users/me", get(handlers::users::current_user_handler))
        .route("/users", get(handlers::users::list_users_handler))
        .route("/users/roles", get(handlers::users::list_roles_handler))
        .route("/users/create", post(handlers::users::create_user_handler))
        .route(
            "/users/{user_id}",
            put(handlers::users::update_user_handler).delete(handlers::users::delete_user_handler),
        )
        .route(
            "/projects",
            get(handlers::projects::list_projects_handler)
                .post(handlers::projects::create_project_handler),
        )
        .route(
            "/projects/{project_id}",
            get(handlers::projects::get_project_handler)
                .delete(handlers::projects::delete_project_handler),
        )
        .route(
            "/projects/{project_id}/tasks",
            get(handlers::projects::list_project_tasks_handler),
        )
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks_handler).post(handlers::tasks::create_task_handler),
        )
        .route(
            "/tasks/{task_id}",
            get(handlers::tasks::get_task_handler).delete(handlers::tasks::delete_task_handler),
        )
        .route(
            "/projects/{project_id}/members",
            get(handlers::collaboration::list_project_members_handler),
        )
        .route(
            "/projects/{project_id}/members/{user_id}",
            post(handlers::collaboration::add_project_member_handler),
        )
        .route(
            "/tasks/{task_id}/subtasks",
            get(handlers::collaboration::list_subtasks_handler)
                .post(handlers::collaboration::create_subtask_handler),
        )
        .route(
            "/tasks/{task_id}/comments",
            get(handlers::collaboration::list_task_comments_handler),
        )
        .route(
            "/comments",
            post(handlers::collaboration::create_comment_handler),
        )
        .route(
            "/notifications",
            get(handlers::collaboration::list_notifications_handler)
                .post(handlers::collaboration::create_notification_handler),
        )
        .route("/search", get(handlers::search::search_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_bearer_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(gated_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
