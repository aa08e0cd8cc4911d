//! Repository for the `users` table.

use bazaar_core::error::CoreError;
use bazaar_core::roles::Role;
use bazaar_core::types::{DbId, Timestamp};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::StoreResult;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, role, password_hash, created_at, last_activity";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (role, password_hash, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(input.role.as_str())
            .bind(&input.password_hash)
            .bind(input.created_at)
            .fetch_one(pool)
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`find_by_id`](Self::find_by_id), failing with `NoSuchUser` when absent.
    pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<User> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::NoSuchUser(id).into())
    }

    /// List all users ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Count users holding `role`.
    pub async fn count_with_role(pool: &SqlitePool, role: Role) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?1")
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Resolve the role of `id` on the caller's connection.
    ///
    /// Returns `None` if no such user exists.
    pub async fn find_role(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> StoreResult<Option<Role>> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(role.map(|r| r.parse::<Role>()).transpose()?)
    }

    /// Fail with `NoSuchUser` or `InvalidRole` unless `id` is a user with `expected`.
    pub async fn require_role(
        conn: &mut SqliteConnection,
        id: DbId,
        expected: Role,
    ) -> StoreResult<()> {
        match Self::find_role(conn, id).await? {
            None => Err(CoreError::NoSuchUser(id).into()),
            Some(role) if role == expected => Ok(()),
            Some(_) => Err(CoreError::InvalidRole {
                user_id: id,
                expected,
            }
            .into()),
        }
    }

    /// Record that the user was just active, returning the updated row.
    ///
    /// A single statement, so it waits on the busy timeout like any other
    /// write. `None` if the user does not exist.
    pub async fn touch_last_activity(
        pool: &SqlitePool,
        id: DbId,
        at: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET last_activity = ?2 WHERE id = ?1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(pool)
            .await
    }
}
