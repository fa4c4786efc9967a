use std::sync::atomic::AtomicU64;

use chirpr_core::AppConfig;
use chrono::Duration;
use storage::{ChirpStore, PgPool, RefreshTokenStore, UserStore};

/// Application state shared across all handlers.
pub struct AppState {
    pub users: UserStore,
    pub chirps: ChirpStore,
    pub refresh_tokens: RefreshTokenStore,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub platform: String,
    /// Hits against the /app fileserver since start (or last admin reset).
    pub fileserver_hits: AtomicU64,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            chirps: ChirpStore::new(pool.clone()),
            refresh_tokens: RefreshTokenStore::new(pool),
            jwt_secret: config.auth.jwt_secret.clone(),
            access_token_ttl: Duration::seconds(config.auth.token_expiry_seconds),
            refresh_token_ttl: Duration::days(config.auth.refresh_expiry_days),
            platform: config.platform.clone(),
            fileserver_hits: AtomicU64::new(0),
        }
    }
}
