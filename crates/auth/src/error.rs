use thiserror::Error;

/// Fine-grained auth failures. The HTTP boundary collapses every token and
/// header variant into a single 401 before anything reaches a client; the
/// distinctions exist for logging and tests.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token subject is not a valid user id")]
    TokenMalformed,

    #[error("Authorization header not found")]
    MissingAuthHeader,

    #[error("Authorization header must start with Bearer")]
    MalformedAuthHeader,

    #[error("Bearer token is empty")]
    EmptyBearerToken,
}

pub type Result<T> = std::result::Result<T, AuthError>;
