//! Handlers for the `/sellers/{id}` sub-resources.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_core::item::{self, NewItem};
use bazaar_core::policy;
use bazaar_core::types::DbId;
use bazaar_db::models::item::ItemWithSaleCount;
use bazaar_db::repositories::ItemRepo;
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAdminOrSeller, RequireSeller};
use crate::response::CreatedItem;
use crate::state::AppState;

/// Request body for `POST /sellers/{id}/labels`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub item_ids: Vec<DbId>,
}

/// GET /api/v1/sellers/{id}/items
pub async fn list_items(
    RequireAdminOrSeller(user): RequireAdminOrSeller,
    State(state): State<AppState>,
    AppPath(seller_id): AppPath<DbId>,
) -> AppResult<Json<Vec<ItemWithSaleCount>>> {
    policy::authorize_view_seller_items(&user.actor(), seller_id)?;

    let items = ItemRepo::list_for_seller_with_sale_counts(&state.pool, seller_id).await?;
    Ok(Json(items))
}

/// PUT /api/v1/sellers/{id}/items
pub async fn add_item(
    RequireAdminOrSeller(user): RequireAdminOrSeller,
    State(state): State<AppState>,
    AppPath(seller_id): AppPath<DbId>,
    AppJson(input): AppJson<NewItem>,
) -> AppResult<(StatusCode, Json<CreatedItem>)> {
    policy::authorize_add_item(&user.actor(), seller_id)?;

    let item_id = ItemRepo::add(&state.pool, Utc::now(), seller_id, &input).await?;
    Ok((StatusCode::CREATED, Json(CreatedItem { item_id })))
}

/// POST /api/v1/sellers/{id}/labels
///
/// Render labels for the given items, then freeze them as rendered. Nothing
/// is frozen unless rendering succeeded, and an item edited while its label
/// was being rendered fails the request with `item_changed`.
pub async fn generate_labels(
    RequireSeller(user): RequireSeller,
    State(state): State<AppState>,
    AppPath(seller_id): AppPath<DbId>,
    AppJson(input): AppJson<LabelRequest>,
) -> AppResult<Response> {
    policy::authorize_generate_labels(&user.actor(), seller_id)?;

    item::validate_label_items(&input.item_ids)?;

    let items = ItemRepo::get_many_for_seller(&state.pool, seller_id, &input.item_ids).await?;

    let document = state
        .label_renderer
        .render(seller_id, &items)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    ItemRepo::freeze_rendered(&state.pool, &items).await?;
    tracing::info!(seller_id, count = items.len(), bytes = document.len(), "Labels generated");

    Ok((
        [(CONTENT_TYPE, state.label_renderer.content_type())],
        document,
    )
        .into_response())
}
