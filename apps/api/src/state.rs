use tasklane_application::{
    AuthorizationGate, CommentService, NotificationService, ProjectMembershipService,
    ProjectService, SearchService, SubtaskService, TaskService, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub project_service: ProjectService,
    pub task_service: TaskService,
    pub membership_service: ProjectMembershipService,
    pub subtask_service: SubtaskService,
    pub comment_service: CommentService,
    pub notification_service: NotificationService,
    pub search_service: SearchService,
    pub authorization_gate: AuthorizationGate,
}
