use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use storage::Chirp;

/// Maximum chirp body length in bytes.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words that get masked, matched case-insensitively on whole
/// whitespace-split words. Punctuation sticks to its word, so "sharbert!"
/// passes through untouched.
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Reject over-length bodies, then mask profanity.
pub fn validate_chirp_body(body: &str) -> Result<String, ApiError> {
    if body.len() > MAX_CHIRP_LENGTH {
        return Err(ApiError::BadRequest("Chirp is too long"));
    }

    Ok(clean_profanity(body))
}

fn clean_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if BANNED_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Existence before ownership: a missing chirp is NotFound, someone else's
/// chirp is Forbidden. The caller must already hold a verified identity.
pub fn authorize_chirp_mutation(chirp: Option<&Chirp>, user_id: Uuid) -> Result<(), ApiError> {
    let chirp = chirp.ok_or(ApiError::NotFound("Chirp not found"))?;

    if chirp.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

fn parse_chirp_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid chirp ID"))
}

/// POST /api/chirps — author comes from the access token, never the body.
pub async fn create_chirp(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateChirpRequest>,
) -> ApiResult<(StatusCode, Json<Chirp>)> {
    let body = validate_chirp_body(&payload.body)?;
    let chirp = state.chirps.create(&body, user_id).await?;

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps — all chirps, oldest first.
pub async fn get_chirps(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Chirp>>> {
    let chirps = state.chirps.list_all().await?;
    Ok(Json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(chirp_id): Path<String>,
) -> ApiResult<Json<Chirp>> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let chirp = state
        .chirps
        .get(chirp_id)
        .await?
        .ok_or(ApiError::NotFound("Chirp not found"))?;

    Ok(Json(chirp))
}

/// DELETE /api/chirps/{chirp_id} — owner only.
pub async fn delete_chirp(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(chirp_id): Path<String>,
) -> ApiResult<StatusCode> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let chirp = state.chirps.get(chirp_id).await?;
    authorize_chirp_mutation(chirp.as_ref(), user_id)?;

    state.chirps.delete(chirp_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn chirp_owned_by(user_id: Uuid) -> Chirp {
        let now = Utc::now();
        Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: "hello".to_string(),
            user_id,
        }
    }

    #[test]
    fn test_length_limit() {
        let at_limit = "a".repeat(MAX_CHIRP_LENGTH);
        assert_eq!(validate_chirp_body(&at_limit).unwrap(), at_limit);

        let over = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert_eq!(
            validate_chirp_body(&over),
            Err(ApiError::BadRequest("Chirp is too long"))
        );
    }

    #[test]
    fn test_profanity_is_masked() {
        assert_eq!(
            validate_chirp_body("This is a kerfuffle opinion I need to share").unwrap(),
            "This is a **** opinion I need to share"
        );
    }

    #[test]
    fn test_profanity_is_case_insensitive() {
        assert_eq!(
            validate_chirp_body("Sharbert I hate it").unwrap(),
            "**** I hate it"
        );
    }

    #[test]
    fn test_profanity_with_punctuation_passes() {
        assert_eq!(
            validate_chirp_body("I hear Mastodon is better than Chirpr. sharbert!").unwrap(),
            "I hear Mastodon is better than Chirpr. sharbert!"
        );
    }

    #[test]
    fn test_owner_may_mutate() {
        let user = Uuid::new_v4();
        let chirp = chirp_owned_by(user);

        assert!(authorize_chirp_mutation(Some(&chirp), user).is_ok());
    }

    #[test]
    fn test_foreign_owner_is_forbidden_not_missing() {
        let chirp = chirp_owned_by(Uuid::new_v4());

        let result = authorize_chirp_mutation(Some(&chirp), Uuid::new_v4());
        assert_eq!(result, Err(ApiError::Forbidden));
    }

    #[test]
    fn test_missing_chirp_is_not_found_even_for_wrong_owner() {
        let result = authorize_chirp_mutation(None, Uuid::new_v4());
        assert_eq!(result, Err(ApiError::NotFound("Chirp not found")));
    }

    #[test]
    fn test_invalid_chirp_id() {
        assert_eq!(
            parse_chirp_id("not-a-uuid"),
            Err(ApiError::BadRequest("Invalid chirp ID"))
        );
    }
}
