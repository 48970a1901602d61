//! Identity token issuance and verification.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use tasklane_core::{TokenError, UserIdentity};

/// Lifetime of an issued identity token.
pub const IDENTITY_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried inside a signed identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Subject the token was issued to.
    pub subject: String,
    /// Issue instant as unix seconds.
    pub issued_at: i64,
    /// Expiry instant as unix seconds.
    pub expires_at: i64,
}

/// Port for signing and decoding identity tokens.
///
/// `decode` checks signature and structure only; expiry is judged by
/// [`TokenService`] against its clock.
pub trait IdentityTokenCodec: Send + Sync {
    /// Signs claims into an opaque token string.
    fn encode(&self, claims: &IdentityClaims) -> Result<String, TokenError>;

    /// Verifies the signature and returns the embedded claims.
    fn decode(&self, token: &str) -> Result<IdentityClaims, TokenError>;
}

/// Time source port.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Issues and verifies stateless identity tokens.
#[derive(Clone)]
pub struct TokenService {
    codec: Arc<dyn IdentityTokenCodec>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service with the standard 24 hour lifetime.
    #[must_use]
    pub fn new(codec: Arc<dyn IdentityTokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            clock,
            ttl: Duration::hours(IDENTITY_TOKEN_TTL_HOURS),
        }
    }

    /// Issues a token for the subject expiring 24 hours from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let issued_at = self.clock.now();
        let claims = IdentityClaims {
            subject: subject.to_owned(),
            issued_at: issued_at.timestamp(),
            expires_at: (issued_at + self.ttl).timestamp(),
        };

        self.codec.encode(&claims)
    }

    /// Verifies a token and returns the identity it names. No store lookup.
    pub fn verify(&self, token: &str) -> Result<UserIdentity, TokenError> {
        let claims = self.codec.decode(token)?;

        if claims.expires_at <= self.clock.now().timestamp() {
            return Err(TokenError::InvalidToken);
        }

        if claims.subject.trim().is_empty() {
            return Err(TokenError::InvalidToken);
        }

        Ok(UserIdentity::new(claims.subject))
    }
}
