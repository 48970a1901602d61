use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tasklane_application::GateDecision;

use crate::error::ApiResult;
use crate::state::AppState;

/// Runs the authorization gate and attaches the caller's identity.
///
/// Public routes pass through untouched. Protected routes continue with a
/// `UserIdentity` extension or stop here with 401.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let decision = state.authorization_gate.authorize(
        request.method().as_str(),
        request.uri().path(),
        authorization,
    )?;

    if let GateDecision::Authenticated(identity) = decision {
        request.extensions_mut().insert(identity);
    }

    Ok(next.run(request).await)
}
