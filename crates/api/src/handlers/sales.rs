//! Handlers for the `/sales` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::policy::{self, ADMIN_OR_CASHIER};
use bazaar_core::types::DbId;
use bazaar_db::models::sale::{SaleWithItems, SalesOverview};
use bazaar_db::repositories::SaleRepo;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireCashier};
use crate::query::SalesParams;
use crate::response::CreatedSale;
use crate::state::AppState;

/// Request body for `POST /sales`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSaleRequest {
    pub item_ids: Vec<DbId>,
}

/// POST /api/v1/sales
pub async fn register(
    RequireCashier(cashier): RequireCashier,
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterSaleRequest>,
) -> AppResult<(StatusCode, Json<CreatedSale>)> {
    let sale_id =
        SaleRepo::register(&state.pool, cashier.user_id, &input.item_ids, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(CreatedSale { sale_id })))
}

/// GET /api/v1/sales?startId=
///
/// Summaries from `startId` onwards plus totals over every sale.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SalesParams>,
) -> AppResult<Json<SalesOverview>> {
    let overview = SaleRepo::overview(&state.pool, params.start_id).await?;
    tracing::debug!(
        start_id = ?params.start_id,
        page = overview.sales.len(),
        sale_count = overview.sale_count,
        "Sales overview read"
    );
    Ok(Json(overview))
}

/// GET /api/v1/sales/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SaleWithItems>> {
    let actor = user.actor();
    policy::require_role(&actor, ADMIN_OR_CASHIER)?;

    let sale = SaleRepo::get_with_items(&state.pool, id).await?;
    policy::authorize_view_sale(&actor, sale.sale.cashier_id)?;

    Ok(Json(sale))
}
