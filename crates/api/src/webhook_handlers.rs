use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use storage::StorageError;

/// The only payment-provider event this service acts on.
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub user_id: Uuid,
}

/// POST /api/polka/webhooks — premium upgrade notifications. Unrecognized
/// events are acknowledged without action so the provider stops retrying.
pub async fn polka_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookRequest>,
) -> ApiResult<StatusCode> {
    if payload.event != USER_UPGRADED_EVENT {
        return Ok(StatusCode::NO_CONTENT);
    }

    state
        .users
        .upgrade_to_premium(payload.data.user_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => ApiError::NotFound("User not found"),
            other => other.into(),
        })?;

    tracing::info!(user_id = %payload.data.user_id, "user upgraded to premium");

    Ok(StatusCode::NO_CONTENT)
}
