use serde::{Deserialize, Serialize};
use tasklane_application::CreateTaskInput;
use tasklane_core::AppError;
use tasklane_domain::{Task, TaskPriority, TaskStatus, parse_optional_datetime};
use ts_rs::TS;

/// Incoming payload for task creation.
#[derive(Debug, Deserialize, TS)]
pub struct CreateTaskRequest {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
    /// One of `low`, `medium`, `high`.
    pub priority: Option<String>,
    /// One of `todo`, `in_progress`, `done`.
    pub status: Option<String>,
}

/// API representation of a task.
#[derive(Debug, Serialize, TS)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub project_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<CreateTaskRequest> for CreateTaskInput {
    type Error = AppError;

    fn try_from(request: CreateTaskRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id,
            title: request.title,
            description: request.description,
            project_id: non_blank(request.project_id),
            assignee_id: non_blank(request.assignee_id),
            due_date: parse_optional_datetime(request.due_date.as_deref())?,
            priority: non_blank(request.priority)
                .map(|value| value.parse::<TaskPriority>())
                .transpose()?,
            status: non_blank(request.status)
                .map(|value| value.parse::<TaskStatus>())
                .transpose()?,
        })
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            project_id: task.project_id().map(ToString::to_string),
            assignee_id: task.assignee_id().map(ToString::to_string),
            due_date: task.due_date().map(|value| value.to_rfc3339()),
            priority: task.priority().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            created_by: task.created_by().to_string(),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().to_rfc3339(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
