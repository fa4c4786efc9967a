use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// The authenticated subject, resolved from a verified access token.
/// Only ever constructed by `require_auth` — a handler seeing this value
/// knows the signature and expiry checks already passed.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Middleware guarding protected routes. Validates the bearer token before
/// the handler runs, so authentication failure always precedes any resource
/// lookup. All failure kinds collapse to a single 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth::bearer_token(request.headers())?;
    let user_id = auth::validate_access_token(&token, &state.jwt_secret)?;

    request.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(request).await)
}

/// Counts fileserver traffic for the admin metrics page.
pub async fn track_fileserver_hit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Reachable only if a route forgot its require_auth layer.
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}
