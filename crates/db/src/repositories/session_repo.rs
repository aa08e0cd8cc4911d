//! Repository for the `sessions` table.
//!
//! Only the SHA-256 digest of a token is stored; callers pass the plaintext
//! and this module hashes it before every lookup.

use bazaar_core::error::CoreError;
use bazaar_core::session::{hash_session_token, is_expired};
use bazaar_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::error::StoreResult;
use crate::models::session::{CreateSession, Session};
use crate::models::user::User;
use crate::repositories::UserRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "token_hash, user_id, created_at, expires_at";

/// Provides session persistence and resolution.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token_hash)
            .bind(input.user_id)
            .bind(input.created_at)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Resolve a plaintext token to its user, recording activity.
    ///
    /// Fails with `NoSuchSession` for an unknown token and `SessionExpired`
    /// once `now` has reached the expiry instant. Expired rows are left for
    /// [`delete_expired`](Self::delete_expired). The lookup is a plain read;
    /// only the activity touch writes.
    pub async fn resolve(pool: &SqlitePool, token: &str, now: Timestamp) -> StoreResult<User> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = ?1");
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(hash_session_token(token))
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NoSuchSession)?;

        if is_expired(session.expires_at, now) {
            return Err(CoreError::SessionExpired.into());
        }

        UserRepo::touch_last_activity(pool, session.user_id, now)
            .await?
            .ok_or_else(|| CoreError::NoSuchSession.into())
    }

    /// Delete the session for a plaintext token. Returns `true` if one existed.
    pub async fn delete(pool: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?1")
            .bind(hash_session_token(token))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session whose expiry is at or before `now`.
    pub async fn delete_expired(pool: &SqlitePool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
