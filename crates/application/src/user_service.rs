//! User lifecycle: registration, login, profile and administration.
//!
//! Administrative operations re-check the caller's role through
//! [`RolePolicy`] on every call before touching the store.

use std::sync::Arc;

use tracing::info;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::{EmailAddress, Role, RoleId, UserId, validate_password};

use crate::{
    Clock, PasswordHasher, RolePolicy, RoleRepository, TokenService, UserProfile, UserRecord,
    UserRepository,
};

mod administration;
mod login;
mod registration;

/// Timezone stored when the caller leaves it blank.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Language stored when the caller leaves it blank.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Self-service registration payload. Always yields a member account.
#[derive(Debug, Clone, Default)]
pub struct RegisterUserInput {
    /// Caller-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Preferred UI language.
    pub language: String,
}

/// Administrator-created account payload.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role to assign.
    pub role_id: RoleId,
    /// IANA timezone name.
    pub timezone: String,
    /// Preferred UI language.
    pub language: String,
}

/// Administrator update payload.
#[derive(Debug, Clone)]
pub struct UpdateUserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role to assign.
    pub role_id: RoleId,
    /// IANA timezone name.
    pub timezone: String,
    /// Preferred UI language.
    pub language: String,
}

/// Application service for users and roles.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: TokenService,
    role_policy: RolePolicy,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: TokenService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let role_policy = RolePolicy::new(user_repository.clone(), role_repository.clone());
        Self {
            user_repository,
            role_repository,
            password_hasher,
            token_service,
            role_policy,
            clock,
        }
    }

    /// Returns the profile of the authenticated caller.
    pub async fn current_user(&self, actor: &UserIdentity) -> AppResult<UserProfile> {
        let user_id = UserId::parse(actor.subject())?;
        let record = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        let role = self.role_repository.find_by_id(record.role_id).await?;

        Ok(UserProfile::from_record(record, role.as_ref()))
    }

    async fn require_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.role_repository
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' not found")))
    }

    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> AppResult<()> {
        match self.user_repository.find_by_email(email.as_str()).await? {
            Some(existing) if Some(&existing.id) != owner => Err(AppError::Conflict(
                "email address is already registered".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn new_record(
        &self,
        id: UserId,
        name: String,
        email: EmailAddress,
        password_hash: String,
        role_id: RoleId,
        timezone: String,
        language: String,
    ) -> UserRecord {
        let now = self.clock.now();
        UserRecord {
            id,
            name: name.trim().to_owned(),
            email: email.into(),
            password_hash,
            role_id,
            timezone: or_default(timezone, DEFAULT_TIMEZONE),
            language: or_default(language, DEFAULT_LANGUAGE),
            created_at: now,
            updated_at: now,
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed.to_owned()
    }
}
