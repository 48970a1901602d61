//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod comment;
mod dates;
mod notification;
mod project;
mod role;
mod search;
mod subtask;
mod task;
mod user;

pub use comment::{Comment, CommentDefinitionInput, CommentId};
pub use dates::{parse_flexible_datetime, parse_optional_datetime};
pub use notification::{Notification, NotificationDefinitionInput, NotificationId};
pub use project::{Project, ProjectDefinitionInput, ProjectId};
pub use role::{ADMIN_ROLE_NAME, MEMBER_ROLE_ID, Role, RoleId};
pub use search::{DocumentType, SEARCH_PAGE_SIZE, SearchDocument};
pub use subtask::{Subtask, SubtaskDefinitionInput, SubtaskId};
pub use task::{Task, TaskDefinitionInput, TaskId, TaskPriority, TaskStatus};
pub use user::{EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, UserId, validate_password};
