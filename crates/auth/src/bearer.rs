use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::error::{AuthError, Result};

/// Pull the bearer credential out of an `Authorization` header.
///
/// Returns the token with surrounding whitespace trimmed. Pure: no I/O, no
/// clock, no allocation beyond the returned string. The same function serves
/// both access tokens and refresh tokens — the caller decides which kind it
/// expects.
pub fn bearer_token(headers: &HeaderMap) -> Result<String> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    let header = header
        .to_str()
        .map_err(|_| AuthError::MalformedAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::EmptyBearerToken);
    }

    Ok(token.to_string())
}
