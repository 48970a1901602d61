use serde::{Deserialize, Serialize};
use tasklane_core::{AppResult, NonEmptyString};

/// Role name that grants administrative privileges.
pub const ADMIN_ROLE_NAME: &str = "admin";

/// Role assigned to self-registered accounts.
pub const MEMBER_ROLE_ID: RoleId = RoleId(2);

/// Identifier of a role row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(i32);

impl RoleId {
    /// Wraps a stored role identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Named role that a credential record references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: String,
}

impl Role {
    /// Creates a role with a validated name.
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the human readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Whether this role is the administrative role. Exact, case-sensitive.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.name.as_str() == ADMIN_ROLE_NAME
    }
}
