//! Handlers for login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::roles::Role;
use bazaar_core::session::generate_session_token;
use bazaar_core::types::DbId;
use bazaar_db::models::session::CreateSession;
use bazaar_db::repositories::{SessionRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{cleared_session_cookie, session_cookie};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, SessionToken};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The login name is the numeric user id, sent either as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginName {
    Id(DbId),
    Text(String),
}

impl LoginName {
    fn user_id(&self) -> Option<DbId> {
        match self {
            LoginName::Id(id) => Some(*id),
            LoginName::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: LoginName,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: DbId,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/login
///
/// Check user id + password and open a session. The token travels only in
/// the `Set-Cookie` header.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = input
        .username
        .user_id()
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    if !verify_password(&input.password, &user.password_hash)? {
        tracing::info!(user_id, "Login rejected");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let now = Utc::now();
    let lifetime = state.config.session_lifetime();
    let token = generate_session_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            token_hash: token.hash,
            user_id: user.id,
            created_at: now,
            expires_at: now + lifetime,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let cookie = session_cookie(&token.plaintext, lifetime);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            user_id: user.id,
            role: user.role,
        }),
    ))
}

/// POST /api/v1/logout
///
/// Delete the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    SessionToken(token): SessionToken,
) -> AppResult<impl IntoResponse> {
    SessionRepo::delete(&state.pool, &token).await?;
    tracing::info!(user_id = user.user_id, "User logged out");

    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cleared_session_cookie())]))
}
