//! Handlers for the `/cashiers/{id}` sub-resources.

use axum::extract::State;
use axum::Json;
use bazaar_core::policy;
use bazaar_core::types::DbId;
use bazaar_db::models::sale::SaleSummary;
use bazaar_db::repositories::SaleRepo;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/cashiers/{id}/sales
pub async fn list_sales(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(cashier_id): AppPath<DbId>,
) -> AppResult<Json<Vec<SaleSummary>>> {
    policy::authorize_view_cashier_sales(&user.actor(), cashier_id)?;

    let sales = SaleRepo::summaries_for_cashier(&state.pool, cashier_id).await?;
    Ok(Json(sales))
}
