use std::collections::HashMap;

use super::*;

impl UserService {
    /// Lists every user with resolved role names. Administrators only.
    pub async fn list_users(&self, actor: &UserIdentity) -> AppResult<Vec<UserProfile>> {
        self.role_policy.require_privileged(actor).await?;

        let roles: HashMap<RoleId, Role> = self
            .role_repository
            .find_all()
            .await?
            .into_iter()
            .map(|role| (role.id(), role))
            .collect();

        Ok(self
            .user_repository
            .find_all()
            .await?
            .into_iter()
            .map(|record| {
                let role = roles.get(&record.role_id);
                UserProfile::from_record(record, role)
            })
            .collect())
    }

    /// Lists assignable roles. Administrators only.
    pub async fn list_roles(&self, actor: &UserIdentity) -> AppResult<Vec<Role>> {
        self.role_policy.require_privileged(actor).await?;
        self.role_repository.find_all().await
    }

    /// Creates an account with an explicit role. Administrators only.
    pub async fn create_user(
        &self,
        actor: &UserIdentity,
        input: CreateUserInput,
    ) -> AppResult<UserId> {
        self.role_policy.require_privileged(actor).await?;

        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;
        let role = self.require_role(input.role_id).await?;
        self.ensure_email_available(&email, None).await?;

        let user_id = UserId::new();
        let password_hash = self.password_hasher.hash_password(&input.password)?;
        let record = self.new_record(
            user_id.clone(),
            input.name,
            email,
            password_hash,
            role.id(),
            input.timezone,
            input.language,
        );
        self.user_repository.create(record).await?;

        info!(
            user_id = %user_id,
            created_by = actor.subject(),
            role = role.name(),
            "user created by administrator"
        );
        Ok(user_id)
    }

    /// Updates profile fields and role of an existing user. Administrators only.
    pub async fn update_user(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        input: UpdateUserInput,
    ) -> AppResult<()> {
        self.role_policy.require_privileged(actor).await?;

        let user_id = UserId::parse(user_id)?;
        let mut record = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;
        let role = self.require_role(input.role_id).await?;
        let email = EmailAddress::new(input.email)?;
        self.ensure_email_available(&email, Some(&user_id)).await?;

        record.name = input.name.trim().to_owned();
        record.email = email.into();
        record.role_id = role.id();
        record.timezone = or_default(input.timezone, DEFAULT_TIMEZONE);
        record.language = or_default(input.language, DEFAULT_LANGUAGE);
        record.updated_at = self.clock.now();
        self.user_repository.update(record).await?;

        info!(user_id = %user_id, updated_by = actor.subject(), "user updated by administrator");
        Ok(())
    }

    /// Deletes a user. Administrators only.
    pub async fn delete_user(&self, actor: &UserIdentity, user_id: &str) -> AppResult<()> {
        self.role_policy.require_privileged(actor).await?;

        let user_id = UserId::parse(user_id)?;
        self.user_repository.delete(&user_id).await?;

        info!(user_id = %user_id, deleted_by = actor.subject(), "user deleted by administrator");
        Ok(())
    }
}
