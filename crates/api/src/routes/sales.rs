//! Route definitions for the `/sales` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sales;
use crate::state::AppState;

/// Routes mounted at `/sales`.
///
/// ```text
/// POST /        -> register  (cashier)
/// GET  /        -> list      (admin; ?startId=)
/// GET  /{id}    -> get_by_id (admin, registering cashier)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::list).post(sales::register))
        .route("/{id}", get(sales::get_by_id))
}
