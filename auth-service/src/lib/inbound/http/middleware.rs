use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// Extension type carrying the verified identity into downstream handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Token gate: verifies the bearer token and attaches its claims to the
/// request, or rejects with one uniform denial. Missing, malformed, invalid,
/// and expired tokens are distinguishable in the logs only.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).map_err(reject)?;

    let claims = state.auth_service.authorize(token).map_err(reject)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.sub),
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn reject(err: AuthError) -> Response {
    tracing::debug!(reason = %err, "request rejected at the token gate");
    ApiError::from(err).into_response()
}

fn extract_bearer_token(req: &Request) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidToken)?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}
