use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authenticated caller resolved from a verified identity token.
///
/// Carried as a typed request extension; handlers receive it explicitly
/// instead of looking it up by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
}

impl UserIdentity {
    /// Creates an identity for a verified subject.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Returns the stable subject identifier embedded in the token.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }
}

/// Failures raised while issuing or verifying identity tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Internal cryptographic failure while signing.
    #[error("signing error: {0}")]
    Signing(String),

    /// Signature mismatch, malformed encoding, or expired token.
    #[error("invalid token")]
    InvalidToken,
}
