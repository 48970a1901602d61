use super::*;

const LOGIN_FAILED: &str = "invalid email or password";

impl UserService {
    /// Authenticates with email and password and issues an identity token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let Ok(email) = EmailAddress::new(email) else {
            return Err(AppError::Unauthorized(LOGIN_FAILED.to_owned()));
        };

        let Some(user) = self.user_repository.find_by_email(email.as_str()).await? else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(LOGIN_FAILED.to_owned()));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            return Err(AppError::Unauthorized(LOGIN_FAILED.to_owned()));
        }

        let token = self.token_service.issue(user.id.as_str())?;
        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }
}
