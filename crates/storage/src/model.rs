use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. Deliberately not `Serialize`: the hashed password
/// must never ride along into a response body, so the API layer builds its
/// own view of a user.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_premium: bool,
}

/// A single message.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// A persisted refresh-token row. The token string itself is the key; the
/// row holds everything the opaque token does not carry.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token_row(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "ab".repeat(32),
            created_at: now,
            updated_at: now,
            user_id: Uuid::new_v4(),
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn test_live_token() {
        let row = token_row(Duration::days(60), false);
        assert!(!row.is_expired());
        assert!(!row.is_revoked());
    }

    #[test]
    fn test_expired_token() {
        let row = token_row(Duration::seconds(-1), false);
        assert!(row.is_expired());
    }

    #[test]
    fn test_revoked_token() {
        let row = token_row(Duration::days(60), true);
        assert!(row.is_revoked());
    }
}
