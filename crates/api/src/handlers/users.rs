//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::policy;
use bazaar_core::roles::Role;
use bazaar_core::types::DbId;
use bazaar_db::models::item::ItemWithSaleCount;
use bazaar_db::models::sale::SaleSummary;
use bazaar_db::models::user::{CreateUser, UserResponse};
use bazaar_db::repositories::{ItemRepo, SaleRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::CreatedUser;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub role: Role,
    pub password: String,
}

/// A user plus the rollup matching their role.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemWithSaleCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<SaleSummary>>,
}

/// GET /api/v1/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedUser>)> {
    let create = CreateUser {
        role: input.role,
        password_hash: hash_password(&input.password)?,
        created_at: Utc::now(),
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User added");
    Ok((StatusCode::CREATED, Json(CreatedUser { user_id: user.id })))
}

/// GET /api/v1/users/{id}
///
/// Sellers get their items with sale counts, cashiers their sales.
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserDetail>> {
    policy::authorize_view_user(&user.actor(), id)?;

    let target = UserRepo::get(&state.pool, id).await?;
    let (items, sales) = match target.role {
        Role::Seller => (
            Some(ItemRepo::list_for_seller_with_sale_counts(&state.pool, id).await?),
            None,
        ),
        Role::Cashier => (None, Some(SaleRepo::summaries_for_cashier(&state.pool, id).await?)),
        Role::Admin => (None, None),
    };

    Ok(Json(UserDetail {
        user: target.into(),
        items,
        sales,
    }))
}
