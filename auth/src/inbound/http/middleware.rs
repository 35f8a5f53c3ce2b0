use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::authenticator::Authenticator;
use crate::identity::UserId;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer access tokens and adds the user to request
/// extensions.
///
/// Handlers still have to check that `user_id` owns the resource they touch.
pub async fn require_user(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let user_id = authenticator.authenticate_bearer(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "Bearer authentication failed");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware that admits only callers presenting the configured API key.
pub async fn require_api_key(
    State(authenticator): State<Arc<Authenticator>>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    authenticator.authorize_webhook(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "API key authentication failed");
        unauthorized()
    })?;

    Ok(next.run(req).await)
}

// One response for every failure kind, so clients cannot tell them apart.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Unauthorized"
        })),
    )
        .into_response()
}
