use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};

/// Issuer label stamped into every access token and required on validation.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpr-access";

/// Access token claims: issuer, issued-at, expiry, subject. Nothing else —
/// the token asserts identity, it does not carry profile data.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub sub: String,
}

/// Mint a signed access token for `user_id`, valid for `expires_in`.
///
/// HS256 over `{iss, iat, exp, sub}` with second-granularity timestamps.
/// Deterministic given identical clock readings.
pub fn make_access_token(user_id: Uuid, secret: &str, expires_in: Duration) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        iss: ACCESS_TOKEN_ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
        sub: user_id.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify an access token and return its subject.
///
/// Checks the HMAC signature, the expiry (strict, zero leeway), and the
/// issuer label. A token whose subject does not parse as a UUID is rejected
/// as malformed even when the signature is good.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    })?;

    Uuid::parse_str(&token_data.claims.sub).map_err(|_| AuthError::TokenMalformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_signing";

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();

        let token = make_access_token(user_id, SECRET, Duration::hours(1)).unwrap();
        let subject = validate_access_token(&token, SECRET).unwrap();

        assert_eq!(subject, user_id);
    }

    #[test]
    fn test_token_is_three_dot_separated_parts() {
        let token = make_access_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = make_access_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();

        let result = validate_access_token(&token, "a_different_secret");
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_expired_token() {
        let token = make_access_token(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();

        let result = validate_access_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let result = validate_access_token("not.a.token", SECRET);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        // Sign a structurally valid token whose subject is not a UUID.
        let now = Utc::now();
        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            sub: "not-a-uuid".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_access_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenMalformed)));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            iss: "someone-else".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            sub: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_access_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }
}
