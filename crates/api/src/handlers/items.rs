//! Handlers for the `/items` resource.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_core::item::ItemPatch;
use bazaar_core::policy;
use bazaar_core::types::DbId;
use bazaar_db::models::item::Item;
use bazaar_db::repositories::{ItemRepo, SaleRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::export::{items_to_csv, CSV_CONTENT_TYPE};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ExportFormat, ItemListParams};
use crate::state::AppState;

/// An item with the ids of the sales it appears in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    pub sold_in: Vec<DbId>,
}

/// GET /api/v1/items?items=all|hidden|visible&format=json|csv
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ItemListParams>,
) -> AppResult<Response> {
    let selection = params.selection()?;
    let format = params.format()?;
    let items = ItemRepo::list(&state.pool, selection).await?;
    tracing::debug!(?selection, count = items.len(), "Items listed");

    Ok(match format {
        ExportFormat::Json => Json(items).into_response(),
        ExportFormat::Csv => (
            [
                (CONTENT_TYPE, CSV_CONTENT_TYPE),
                (CONTENT_DISPOSITION, "attachment; filename=\"items.csv\""),
            ],
            items_to_csv(&items),
        )
            .into_response(),
    })
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ItemDetail>> {
    let item = ItemRepo::get(&state.pool, id).await?;
    policy::authorize_view_item(&user.actor(), item.seller_id)?;

    let sold_in = SaleRepo::sales_with_item(&state.pool, id).await?;
    Ok(Json(ItemDetail { item, sold_in }))
}

/// PUT /api/v1/items/{id}
///
/// Partial update. Locked fields of a frozen item are rejected with
/// `item_frozen`; `hidden` can always change.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<ItemPatch>,
) -> AppResult<StatusCode> {
    let item = ItemRepo::get(&state.pool, id).await?;
    policy::authorize_update_item(&user.actor(), item.seller_id)?;

    ItemRepo::update(&state.pool, id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}
