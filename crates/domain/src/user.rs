//! User domain types and validation rules.

use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult};
use uuid::Uuid;

/// Unique identifier for a user record.
///
/// Identifiers are opaque strings; generated ones are UUID v4 values but
/// callers may register users with an identifier of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a caller-supplied identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Validated email address, normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Requires exactly one `@`, a non-empty local part, and a domain with a
    /// dot followed by at least two characters.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        if normalized.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() || local.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "email local part is invalid".to_owned(),
            ));
        }

        let top_level_ok = domain
            .rsplit_once('.')
            .map(|(host, tld)| {
                !host.is_empty() && tld.len() >= 2 && tld.chars().all(char::is_alphabetic)
            })
            .unwrap_or(false);
        if !top_level_ok {
            return Err(AppError::Validation(
                "email domain must end with a top-level domain".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum accepted password length (bounds Argon2id work per request).
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password length.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn valid_email_is_normalised() {
        let email = EmailAddress::new("  Alice@Example.COM ");
        assert_eq!(
            email.map(String::from).ok().as_deref(),
            Some("alice@example.com")
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_with_two_ats_is_rejected() {
        assert!(EmailAddress::new("a@b@example.com").is_err());
    }

    #[test]
    fn email_without_top_level_domain_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
        assert!(EmailAddress::new("user@example.c").is_err());
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(UserId::parse("   ").is_err());
        assert_eq!(
            UserId::parse(" u1 ").map(|id| id.to_string()).ok().as_deref(),
            Some("u1")
        );
    }

    #[test]
    fn password_bounds_are_enforced() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
        let longest = "x".repeat(PASSWORD_MAX_LENGTH);
        assert!(validate_password(&longest).is_ok());
        assert!(validate_password(&format!("{longest}x")).is_err());
    }

    proptest! {
        #[test]
        fn generated_user_ids_are_never_blank(_seed in 0_u8..16) {
            let id = UserId::new();
            prop_assert!(UserId::parse(id.as_str()).is_ok());
        }

        #[test]
        fn emails_without_at_never_validate(local in "[a-z0-9.]{1,20}") {
            prop_assert!(EmailAddress::new(local).is_err());
        }
    }
}
