//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET /        -> list      (admin; ?items=, ?format=json|csv)
/// GET /{id}    -> get_by_id (admin, cashier, owner)
/// PUT /{id}    -> update    (admin, owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list))
        .route("/{id}", get(items::get_by_id).put(items::update))
}
