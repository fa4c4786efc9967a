//! Relational data layer for the chirpr API.
//!
//! Provides PostgreSQL-backed stores for:
//! - users (accounts, credentials, premium flag)
//! - chirps (the messages themselves)
//! - refresh tokens (opaque, revocable session credentials)
//!
//! All operations are single-row lookups, inserts, updates or deletes; the
//! auth logic upstream never needs a multi-row transaction.

pub mod model;
pub mod service;

pub use model::{Chirp, RefreshToken, User};
pub use service::{ChirpStore, RefreshTokenStore, UserStore};

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use thiserror::Error;

pub use sqlx::PgPool;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found")]
    NotFound,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Open a bounded connection pool against `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Run the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("database migrations are up to date");
    Ok(())
}

/// Map an insert/update error, surfacing a unique-index hit on `users.email`
/// as `EmailTaken`. The index is authoritative; no pre-flight SELECT.
pub(crate) fn map_unique_violation(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::EmailTaken,
        _ => StorageError::Database(err),
    }
}
