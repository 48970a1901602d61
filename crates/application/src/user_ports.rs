//! Credential store ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tasklane_core::AppResult;
use tasklane_domain::{Role, RoleId, UserId};

/// Credential record as persisted in the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical (lowercase) email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Assigned role.
    pub role_id: RoleId,
    /// IANA timezone name chosen by the user.
    pub timezone: String,
    /// Preferred UI language.
    pub language: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// User projection returned to callers; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Assigned role identifier.
    pub role_id: RoleId,
    /// Resolved role name, absent when the role row is missing.
    pub role_name: Option<String>,
    /// IANA timezone name.
    pub timezone: String,
    /// Preferred UI language.
    pub language: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds a profile from a stored record and its resolved role.
    #[must_use]
    pub fn from_record(record: UserRecord, role: Option<&Role>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            role_id: record.role_id,
            role_name: role.map(|role| role.name().to_owned()),
            timezone: record.timezone,
            language: record.language,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Repository port for credential records.
///
/// The store does not enforce that `role_id` resolves; callers validate it
/// before writing.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by identifier.
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserRecord>>;

    /// Finds a user by canonical email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Lists all users ordered by creation time.
    async fn find_all(&self) -> AppResult<Vec<UserRecord>>;

    /// Inserts a new user. Duplicate id or email yields `Conflict`.
    async fn create(&self, user: UserRecord) -> AppResult<()>;

    /// Replaces the mutable fields of an existing user. Missing yields `NotFound`.
    async fn update(&self, user: UserRecord) -> AppResult<()>;

    /// Deletes a user. Missing yields `NotFound`.
    async fn delete(&self, user_id: &UserId) -> AppResult<()>;
}

/// Repository port for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds a role by identifier.
    async fn find_by_id(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Lists all roles ordered by identifier.
    async fn find_all(&self) -> AppResult<Vec<Role>>;
}

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
