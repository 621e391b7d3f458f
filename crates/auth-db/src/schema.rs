//! Idempotent schema bootstrap
//!
//! Run once at startup. Every statement tolerates an existing object, so the
//! bootstrap is safe to repeat against a live database.

use sqlx::PgPool;
use tracing::info;

const STATEMENTS: &[&str] = &[
    // Users: owned by registration, never mutated by the auth workflows
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(255) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE OR REPLACE FUNCTION touch_updated_at() RETURNS TRIGGER AS $$
    BEGIN
        NEW.updated_at = NOW();
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql",
    "DROP TRIGGER IF EXISTS users_touch_updated_at ON users",
    "CREATE TRIGGER users_touch_updated_at
        BEFORE UPDATE ON users
        FOR EACH ROW EXECUTE FUNCTION touch_updated_at()",
    // Refresh sessions: inserted on login/rotation, deleted on logout/rotation/expiry
    "CREATE TABLE IF NOT EXISTS refresh_sessions (
        id BIGSERIAL PRIMARY KEY,
        fingerprint TEXT NOT NULL,
        refresh_token TEXT NOT NULL UNIQUE,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        expires_at TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_refresh_sessions_user ON refresh_sessions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_refresh_sessions_expires ON refresh_sessions(expires_at)",
];

/// Create the `users` and `refresh_sessions` tables if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!(statements = STATEMENTS.len(), "Database schema ready");
    Ok(())
}
