//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_gate;
mod collaboration_ports;
mod comment_service;
mod entity_ports;
mod notification_service;
mod project_membership_service;
mod project_service;
mod role_policy;
mod search_service;
mod search_sync_service;
mod subtask_service;
mod task_service;
mod token_service;
mod user_ports;
mod user_service;
mod write_coordinator;

#[cfg(test)]
mod test_support;

pub use authorization_gate::{AuthorizationGate, GateDecision, PUBLIC_ENDPOINTS, bearer_token};
pub use collaboration_ports::{
    CommentRepository, NotificationRepository, ProjectMember, ProjectMemberRepository,
    SubtaskRepository,
};
pub use comment_service::{CommentService, CreateCommentInput};
pub use entity_ports::{ProjectRepository, SearchIndex, TaskRepository};
pub use notification_service::{CreateNotificationInput, NotificationService};
pub use project_membership_service::ProjectMembershipService;
pub use project_service::{CreateProjectInput, ProjectService};
pub use role_policy::RolePolicy;
pub use search_service::SearchService;
pub use search_sync_service::{SearchSyncService, SyncReport};
pub use subtask_service::SubtaskService;
pub use task_service::{CreateTaskInput, TaskService};
pub use token_service::{
    Clock, IDENTITY_TOKEN_TTL_HOURS, IdentityClaims, IdentityTokenCodec, TokenService,
};
pub use user_ports::{PasswordHasher, RoleRepository, UserProfile, UserRecord, UserRepository};
pub use user_service::{
    CreateUserInput, DEFAULT_LANGUAGE, DEFAULT_TIMEZONE, RegisterUserInput, UpdateUserInput,
    UserService,
};
pub use write_coordinator::WriteCoordinator;
