use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use storage::{StorageError, User};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user. Built explicitly so the password hash can never
/// leak into a response.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_premium: bool,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_premium: user.is_premium,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserBody,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/users — create an account.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<UserBody>)> {
    let hashed_password = auth::hash_password(&payload.password)?;
    let user = state.users.create(&payload.email, &hashed_password).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/login — verify credentials, mint an access token and a
/// persisted refresh token.
///
/// Unknown email and wrong password produce the identical response; the
/// distinction never leaves this function.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .users
        .get_by_email(&payload.email)
        .await?
        .ok_or(ApiError::IncorrectCredentials)?;

    if !auth::verify_password(&payload.password, &user.hashed_password)? {
        return Err(ApiError::IncorrectCredentials);
    }

    let token = auth::make_access_token(user.id, &state.jwt_secret, state.access_token_ttl)?;

    let refresh_token = auth::make_refresh_token()?;
    let expires_at = Utc::now() + state.refresh_token_ttl;
    state
        .refresh_tokens
        .insert(&refresh_token, user.id, expires_at)
        .await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh — exchange a live refresh token (bearer header) for a
/// fresh access token. The refresh token stays valid; it is multi-use until
/// revoked or expired.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    let refresh_token = auth::bearer_token(&headers)?;

    // Unknown, revoked and expired tokens are indistinguishable here: the
    // store returns None for all three.
    let user = state
        .refresh_tokens
        .find_user(&refresh_token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let token = auth::make_access_token(user.id, &state.jwt_secret, state.access_token_ttl)?;

    Ok(Json(RefreshResponse { token }))
}

/// POST /api/revoke — revoke the presented refresh token.
pub async fn revoke(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let refresh_token = auth::bearer_token(&headers)?;
    state.refresh_tokens.revoke(&refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users — update the authenticated user's email and password.
/// The subject comes from the verified token, never from the body.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Json<UserBody>> {
    let hashed_password = auth::hash_password(&payload.password)?;

    let user = state
        .users
        .update_credentials(user_id, &payload.email, &hashed_password)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => ApiError::NotFound("User not found"),
            other => other.into(),
        })?;

    Ok(Json(user.into()))
}
