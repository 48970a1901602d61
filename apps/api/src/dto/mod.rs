mod collaboration;
mod common;
mod projects;
mod search;
mod tasks;
mod users;

pub use collaboration::{
    CommentResponse, CreateCommentRequest, CreateNotificationRequest, CreateSubtaskRequest,
    NotificationResponse, ProjectMemberResponse, SubtaskResponse,
};
pub use common::{CreatedResponse, GenericMessageResponse, HealthResponse};
pub use projects::{CreateProjectRequest, ProjectResponse};
pub use search::{SearchDocumentResponse, SearchQuery};
pub use tasks::{CreateTaskRequest, TaskResponse};
pub use users::{
    CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, RoleResponse,
    UpdateUserRequest, UserResponse,
};
