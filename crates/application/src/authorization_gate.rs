//! Per-request authentication decision.

use tasklane_core::{AppError, AppResult, UserIdentity};

use crate::TokenService;

/// Routes reachable without a token, as `(method, path)` pairs.
pub const PUBLIC_ENDPOINTS: [(&str, &str); 2] =
    [("POST", "/users/login"), ("POST", "/users/register")];

/// Outcome of running the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The route is public; forward unmodified.
    Public,
    /// The caller is authenticated as this identity.
    Authenticated(UserIdentity),
}

/// Classifies routes and verifies bearer tokens.
#[derive(Clone)]
pub struct AuthorizationGate {
    token_service: TokenService,
}

impl AuthorizationGate {
    /// Creates a gate backed by the token service.
    #[must_use]
    pub fn new(token_service: TokenService) -> Self {
        Self { token_service }
    }

    /// Returns whether `(method, path)` is in the public allow-list.
    #[must_use]
    pub fn is_public(method: &str, path: &str) -> bool {
        PUBLIC_ENDPOINTS
            .iter()
            .any(|(public_method, public_path)| *public_method == method && *public_path == path)
    }

    /// Decides whether a request may proceed.
    ///
    /// Public routes ignore the header entirely. Everything else requires
    /// `Authorization: Bearer <token>` with a token that verifies.
    pub fn authorize(
        &self,
        method: &str,
        path: &str,
        authorization: Option<&str>,
    ) -> AppResult<GateDecision> {
        if Self::is_public(method, path) {
            return Ok(GateDecision::Public);
        }

        let header = authorization
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_owned()))?;
        let token = bearer_token(header)?;

        let identity = self
            .token_service
            .verify(token)
            .map_err(|_| AppError::Unauthorized("invalid or expired token".to_owned()))?;

        Ok(GateDecision::Authenticated(identity))
    }
}

/// Extracts the token from `Bearer <token>`.
///
/// The header must split on single spaces into exactly two parts and the
/// scheme must be exactly `Bearer`.
pub fn bearer_token(header: &str) -> AppResult<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AppError::Unauthorized(
            "authorization header must be 'Bearer <token>'".to_owned(),
        )),
    }
}
