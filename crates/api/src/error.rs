use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use auth::AuthError;
use storage::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Client-facing error categories. This is the collapse boundary: every
/// fine-grained auth failure becomes one of these before a response is
/// built, so a caller can never distinguish "expired token" from "bad
/// signature", or "unknown email" from "wrong password".
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Missing/malformed/expired/invalid token. Constant body.
    Unauthorized,
    /// Failed login. Same status as Unauthorized, same for every cause.
    IncorrectCredentials,
    /// Authenticated, but not the owner of the resource.
    Forbidden,
    NotFound(&'static str),
    BadRequest(&'static str),
    EmailTaken,
    /// Internal fault. The cause is logged where the error is converted,
    /// never echoed to the client.
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::IncorrectCredentials => {
                (StatusCode::UNAUTHORIZED, "Incorrect email or password")
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::EmailTaken => (StatusCode::CONFLICT, "Email is already registered"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong"),
        };

        let body = ErrorBody {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(_) | AuthError::TokenGeneration(_) => {
                tracing::error!(error = %err, "internal auth failure");
                ApiError::Internal
            }
            _ => {
                tracing::debug!(error = %err, "rejected credential");
                ApiError::Unauthorized
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound("Not found"),
            StorageError::EmailTaken => ApiError::EmailTaken,
            StorageError::Database(_) | StorageError::Migration(_) => {
                tracing::error!(error = %err, "storage failure");
                ApiError::Internal
            }
        }
    }
}
