use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::{Chirp, RefreshToken, User};
use crate::{Result, StorageError, map_unique_violation};

const USER_COLUMNS: &str = "id, created_at, updated_at, email, hashed_password, is_premium";
const CHIRP_COLUMNS: &str = "id, created_at, updated_at, body, user_id";

/// Account storage.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account. `hashed_password` must already be hashed; this
    /// layer never sees a plaintext credential.
    pub async fn create(&self, email: &str, hashed_password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, hashed_password) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replace a user's email and password hash.
    pub async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET email = $2, hashed_password = $3, updated_at = now() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        user.ok_or(StorageError::NotFound)
    }

    /// Flip the premium flag on. `NotFound` when no such user exists.
    pub async fn upgrade_to_premium(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET is_premium = TRUE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Wipe every account (dev reset). Chirps and refresh tokens go with
    /// them via ON DELETE CASCADE.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

/// Chirp storage.
#[derive(Clone)]
pub struct ChirpStore {
    pool: PgPool,
}

impl ChirpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, body: &str, user_id: Uuid) -> Result<Chirp> {
        let chirp = sqlx::query_as::<_, Chirp>(&format!(
            "INSERT INTO chirps (body, user_id) VALUES ($1, $2) RETURNING {CHIRP_COLUMNS}"
        ))
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    /// All chirps, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Chirp>> {
        let chirps = sqlx::query_as::<_, Chirp>(&format!(
            "SELECT {CHIRP_COLUMNS} FROM chirps ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(chirps)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Chirp>> {
        let chirp = sqlx::query_as::<_, Chirp>(&format!(
            "SELECT {CHIRP_COLUMNS} FROM chirps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chirp)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Refresh-token storage: the store capability behind the token lifecycle.
/// Tokens are stored raw as the primary key; they are already 256-bit random
/// strings, so the column is its own lookup index.
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: PgPool,
}

impl RefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken> {
        let row = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (token, user_id, expires_at) VALUES ($1, $2, $3) \
             RETURNING token, created_at, updated_at, user_id, expires_at, revoked_at",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Resolve a refresh token to its owner, in one filtered join. Unknown,
    /// revoked and expired tokens all come back as `None` — callers cannot
    /// (and must not) tell them apart.
    pub async fn find_user(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.created_at, u.updated_at, u.email, u.hashed_password, u.is_premium \
             FROM users u \
             JOIN refresh_tokens rt ON rt.user_id = u.id \
             WHERE rt.token = $1 AND rt.revoked_at IS NULL AND rt.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Mark a token revoked. Idempotent; revoking an unknown or already
    /// revoked token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = now(), updated_at = now() WHERE token = $1",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests need a real PostgreSQL instance; point DATABASE_URL at a
    // scratch database and run with `--ignored`.

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let pool = crate::connect(&url).await.unwrap();
        crate::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    #[ignore]
    async fn test_refresh_token_lifecycle() {
        let pool = test_pool().await;
        let users = UserStore::new(pool.clone());
        let tokens = RefreshTokenStore::new(pool);

        let user = users
            .create("lifecycle@example.com", "$argon2id$fake")
            .await
            .unwrap();

        let token = "a".repeat(64);
        let expires_at = Utc::now() + chrono::Duration::days(60);
        tokens.insert(&token, user.id, expires_at).await.unwrap();

        // Live token resolves to its owner.
        let found = tokens.find_user(&token).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        // Revoked token resolves to nothing, same as a never-issued one.
        tokens.revoke(&token).await.unwrap();
        assert!(tokens.find_user(&token).await.unwrap().is_none());
        assert!(tokens.find_user(&"b".repeat(64)).await.unwrap().is_none());

        users.delete_all().await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_email_is_rejected() {
        let pool = test_pool().await;
        let users = UserStore::new(pool);

        users
            .create("dupe@example.com", "$argon2id$fake")
            .await
            .unwrap();
        let result = users.create("dupe@example.com", "$argon2id$other").await;

        assert!(matches!(result, Err(StorageError::EmailTaken)));
        users.delete_all().await.unwrap();
    }
}
