use serde::{Deserialize, Serialize};
use tasklane_application::CreateProjectInput;
use tasklane_core::AppError;
use tasklane_domain::{Project, parse_optional_datetime};
use ts_rs::TS;

/// Incoming payload for project creation.
///
/// Dates accept RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
#[derive(Debug, Deserialize, TS)]
pub struct CreateProjectRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// API representation of a project.
#[derive(Debug, Serialize, TS)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<CreateProjectRequest> for CreateProjectInput {
    type Error = AppError;

    fn try_from(request: CreateProjectRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id,
            name: request.name,
            description: request.description,
            start_date: parse_optional_datetime(request.start_date.as_deref())?,
            end_date: parse_optional_datetime(request.end_date.as_deref())?,
        })
    }
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
            start_date: project.start_date().map(|value| value.to_rfc3339()),
            end_date: project.end_date().map(|value| value.to_rfc3339()),
            created_by: project.created_by().to_string(),
            created_at: project.created_at().to_rfc3339(),
            updated_at: project.updated_at().to_rfc3339(),
        }
    }
}
