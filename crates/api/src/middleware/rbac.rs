//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with `wrong_role` when the
//! role is not in the matching set from [`bazaar_core::policy`]. Ownership
//! rules still run inside the handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bazaar_core::policy::{self, ADMIN_ONLY, ADMIN_OR_SELLER, CASHIER_ONLY, SELLER_ONLY};
use bazaar_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    accepted: &[Role],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    policy::require_role(&user.actor(), accepted)?;
    Ok(user)
}

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ADMIN_ONLY).await.map(RequireAdmin)
    }
}

/// Requires the `cashier` role.
pub struct RequireCashier(pub AuthUser);

impl FromRequestParts<AppState> for RequireCashier {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, CASHIER_ONLY).await.map(RequireCashier)
    }
}

/// Requires the `seller` role.
pub struct RequireSeller(pub AuthUser);

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, SELLER_ONLY).await.map(RequireSeller)
    }
}

/// Requires `admin` or `seller`.
pub struct RequireAdminOrSeller(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdminOrSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ADMIN_OR_SELLER)
            .await
            .map(RequireAdminOrSeller)
    }
}
