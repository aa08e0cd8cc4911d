//! Startup tasks that prepare the store before the server accepts requests.

use bazaar_core::roles::Role;
use bazaar_core::types::DbId;
use bazaar_db::models::user::CreateUser;
use bazaar_db::repositories::{SessionRepo, UserRepo};
use bazaar_db::DbPool;
use chrono::Utc;

use crate::auth::password::hash_password;
use crate::error::AppResult;

/// Create an admin with `password` unless the store already has one.
///
/// Returns the new admin's id, or `None` if nothing was created.
pub async fn ensure_admin(pool: &DbPool, password: &str) -> AppResult<Option<DbId>> {
    if UserRepo::count_with_role(pool, Role::Admin).await? > 0 {
        tracing::debug!("Admin already present, skipping bootstrap");
        return Ok(None);
    }

    let input = CreateUser {
        role: Role::Admin,
        password_hash: hash_password(password)?,
        created_at: Utc::now(),
    };
    let admin = UserRepo::create(pool, &input).await?;
    tracing::info!(user_id = admin.id, "Bootstrap admin created");
    Ok(Some(admin.id))
}

/// Remove sessions that expired while the server was down.
pub async fn purge_expired_sessions(pool: &DbPool) -> AppResult<u64> {
    let removed = SessionRepo::delete_expired(pool, Utc::now()).await?;
    tracing::info!(removed, "Expired sessions purged");
    Ok(removed)
}
