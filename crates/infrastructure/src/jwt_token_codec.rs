//! HS256 identity token codec.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tasklane_application::{IdentityClaims, IdentityTokenCodec};
use tasklane_core::{AppError, AppResult, TokenError};

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    user_id: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies identity tokens with a shared HMAC-SHA256 secret.
///
/// Expiry is not checked here; the token service compares `exp` against its
/// own clock.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Creates a codec from the process-wide secret.
    pub fn new(secret: &[u8]) -> AppResult<Self> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl IdentityTokenCodec for JwtTokenCodec {
    fn encode(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        let claims = JwtClaims {
            user_id: claims.subject.clone(),
            iat: claims.issued_at,
            exp: claims.expires_at,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| TokenError::Signing(error.to_string()))
    }

    fn decode(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;

        Ok(IdentityClaims {
            subject: data.claims.user_id,
            issued_at: data.claims.iat,
            expires_at: data.claims.exp,
        })
    }
}
