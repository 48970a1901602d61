use tasklane_domain::MEMBER_ROLE_ID;

use super::*;

impl UserService {
    /// Registers a member account from the public sign-up form.
    ///
    /// The role is fixed to member; a client cannot choose its own role.
    pub async fn register(&self, input: RegisterUserInput) -> AppResult<UserId> {
        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;
        let user_id = match input.id.as_deref() {
            Some(value) if !value.trim().is_empty() => UserId::parse(value)?,
            _ => UserId::new(),
        };

        let role = self.require_role(MEMBER_ROLE_ID).await?;
        self.ensure_email_available(&email, None).await?;

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

        info!(user_id = %user_id, "user registered");
        Ok(user_id)
    }
}
