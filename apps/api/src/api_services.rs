use std::sync::Arc;

use sqlx::PgPool;
use tasklane_application::{
    AuthorizationGate, Clock, CommentRepository, CommentService, NotificationRepository,
    NotificationService, ProjectMemberRepository, ProjectMembershipService, ProjectRepository,
    ProjectService, RoleRepository, SearchIndex, SearchService, SubtaskRepository,
    SubtaskService, TaskRepository, TaskService, TokenService, UserRepository, UserService,
    WriteCoordinator,
};
use tasklane_core::AppError;
use tasklane_infrastructure::{
    Argon2PasswordHasher, InMemoryCommentRepository, InMemoryNotificationRepository,
    InMemoryProjectMemberRepository, InMemoryProjectRepository, InMemoryRoleRepository,
    InMemoryStore, InMemorySubtaskRepository, InMemoryTaskRepository, InMemoryUserRepository,
    JwtTokenCodec, PostgresCommentRepository, PostgresNotificationRepository,
    PostgresProjectMemberRepository, PostgresProjectRepository, PostgresRoleRepository,
    PostgresSubtaskRepository, PostgresTaskRepository, PostgresUserRepository, SolrSearchIndex,
    SystemClock,
};

use crate::api_config::SolrConfig;
use crate::state::AppState;

/// Store adapters the services are wired against.
#[derive(Clone)]
pub struct StorePorts {
    pub user_repository: Arc<dyn UserRepository>,
    pub role_repository: Arc<dyn RoleRepository>,
    pub project_repository: Arc<dyn ProjectRepository>,
    pub task_repository: Arc<dyn TaskRepository>,
    pub member_repository: Arc<dyn ProjectMemberRepository>,
    pub subtask_repository: Arc<dyn SubtaskRepository>,
    pub comment_repository: Arc<dyn CommentRepository>,
    pub notification_repository: Arc<dyn NotificationRepository>,
}

impl StorePorts {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
            role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
            project_repository: Arc::new(PostgresProjectRepository::new(pool.clone())),
            task_repository: Arc::new(PostgresTaskRepository::new(pool.clone())),
            member_repository: Arc::new(PostgresProjectMemberRepository::new(pool.clone())),
            subtask_repository: Arc::new(PostgresSubtaskRepository::new(pool.clone())),
            comment_repository: Arc::new(PostgresCommentRepository::new(pool.clone())),
            notification_repository: Arc::new(PostgresNotificationRepository::new(pool.clone())),
        }
    }

    /// All in-memory repositories share one store so deletes cascade across them.
    pub fn in_memory() -> Result<Self, AppError> {
        let store = InMemoryStore::new();
        Ok(Self {
            user_repository: Arc::new(InMemoryUserRepository::new(store.clone())),
            role_repository: Arc::new(InMemoryRoleRepository::seeded()?),
            project_repository: Arc::new(InMemoryProjectRepository::new(store.clone())),
            task_repository: Arc::new(InMemoryTaskRepository::new(store.clone())),
            member_repository: Arc::new(InMemoryProjectMemberRepository::new(store.clone())),
            subtask_repository: Arc::new(InMemorySubtaskRepository::new(store.clone())),
            comment_repository: Arc::new(InMemoryCommentRepository::new(store.clone())),
            notification_repository: Arc::new(InMemoryNotificationRepository::new(store)),
        })
    }
}

pub fn build_solr_index(config: &SolrConfig) -> Result<Arc<dyn SearchIndex>, AppError> {
    let index = SolrSearchIndex::new(&config.base_url, &config.core, config.timeout)?;
    Ok(Arc::new(index))
}

pub fn build_app_state(
    ports: StorePorts,
    search_index: Arc<dyn SearchIndex>,
    jwt_secret: &[u8],
) -> Result<AppState, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_service = TokenService::new(Arc::new(JwtTokenCodec::new(jwt_secret)?), clock.clone());
    let coordinator = WriteCoordinator::new(search_index.clone());

    Ok(AppState {
        user_service: UserService::new(
            ports.user_repository.clone(),
            ports.role_repository,
            Arc::new(Argon2PasswordHasher::new()),
            token_service.clone(),
            clock.clone(),
        ),
        project_service: ProjectService::new(
            ports.project_repository.clone(),
            coordinator.clone(),
            clock.clone(),
        ),
        task_service: TaskService::new(
            ports.task_repository.clone(),
            ports.project_repository.clone(),
            ports.user_repository.clone(),
            coordinator,
            clock.clone(),
        ),
        membership_service: ProjectMembershipService::new(
            ports.project_repository,
            ports.user_repository.clone(),
            ports.member_repository,
        ),
        subtask_service: SubtaskService::new(
            ports.task_repository.clone(),
            ports.subtask_repository,
            clock.clone(),
        ),
        comment_service: CommentService::new(
            ports.task_repository,
            ports.comment_repository,
            clock.clone(),
        ),
        notification_service: NotificationService::new(
            ports.user_repository,
            ports.notification_repository,
            clock,
        ),
        search_service: SearchService::new(search_index),
        authorization_gate: AuthorizationGate::new(token_service),
    })
}
