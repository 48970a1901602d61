use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult};

/// Maximum number of documents a search query returns.
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Kind of entity a search document was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Derived from a project.
    Project,
    /// Derived from a task.
    Task,
}

impl DocumentType {
    /// Returns the index value for this document type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl FromStr for DocumentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "project" => Ok(Self::Project),
            "task" => Ok(Self::Task),
            _ => Err(AppError::Validation(format!(
                "unknown search document type '{value}'"
            ))),
        }
    }
}

/// Searchable projection of a project or task.
///
/// Never authoritative: always reconstructable from the primary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    id: String,
    document_type: DocumentType,
    title: String,
    description: String,
}

impl SearchDocument {
    /// Creates a search document.
    pub fn new(
        id: impl Into<String>,
        document_type: DocumentType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::Validation(
                "search document id must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            id,
            document_type,
            title: title.into(),
            description: description.into(),
        })
    }

    /// Returns the id of the source entity.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the source entity kind.
    #[must_use]
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Returns the indexed title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the indexed description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Case-insensitive substring match against title and description.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        self.title.to_lowercase().contains(needle.as_str())
            || self.description.to_lowercase().contains(needle.as_str())
    }
}
