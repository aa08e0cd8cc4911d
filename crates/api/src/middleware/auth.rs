//! Session-cookie authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bazaar_core::error::CoreError;
use bazaar_core::policy::Actor;
use bazaar_core::roles::Role;
use bazaar_core::types::DbId;
use bazaar_db::repositories::SessionRepo;
use chrono::Utc;

use crate::auth::cookie;
use crate::error::AppError;
use crate::state::AppState;

/// The plaintext session token from the `bazaar_session` cookie.
///
/// Rejects with `missing_session_id` when the cookie is absent. Does not
/// check the token against the store; use [`AuthUser`] for that.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        cookie::session_token(&parts.headers)
            .map(SessionToken)
            .ok_or(AppError::Core(CoreError::MissingSessionId))
    }
}

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires a session:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
}

impl AuthUser {
    /// The policy view of this user.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;
        let user = SessionRepo::resolve(&state.pool, &token, Utc::now()).await?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
