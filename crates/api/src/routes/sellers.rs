//! Route definitions for the `/sellers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sellers;
use crate::state::AppState;

/// Routes mounted at `/sellers`.
///
/// ```text
/// GET  /{id}/items    -> list_items      (seller self, admin)
/// PUT  /{id}/items    -> add_item        (seller self, admin)
/// POST /{id}/labels   -> generate_labels (seller self)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/items",
            get(sellers::list_items).put(sellers::add_item),
        )
        .route("/{id}/labels", post(sellers::generate_labels))
}
