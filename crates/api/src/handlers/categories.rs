//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_core::item::ItemSelection;
use bazaar_core::policy;
use bazaar_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::auth::AuthUser;
use crate::query::CategoryParams;
use crate::state::AppState;

/// GET /api/v1/categories?counts=all|hidden|visible
///
/// Without `counts`: the category list, for admins and sellers.
/// With `counts`: `{ "<id>": count }` for all twelve ids, admin only.
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Response> {
    let actor = user.actor();

    match params.counts.as_deref() {
        None => {
            policy::authorize_list_categories(&actor)?;
            let categories = CategoryRepo::list(&state.pool).await?;
            Ok(Json(categories).into_response())
        }
        Some(value) => {
            policy::authorize_category_counts(&actor)?;
            let selection: ItemSelection = value.parse()?;
            let counts = CategoryRepo::counts(&state.pool, selection).await?;
            tracing::debug!(?selection, "Category counts read");
            Ok(Json(counts).into_response())
        }
    }
}
