//! Route definitions for the `/cashiers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::cashiers;
use crate::state::AppState;

/// Routes mounted at `/cashiers`.
///
/// ```text
/// GET /{id}/sales   -> list_sales (cashier self, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/sales", get(cashiers::list_sales))
}
